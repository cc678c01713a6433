//! Source language identity

use serde::{Deserialize, Serialize};

/// Languages the rewriter can load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    Java,
}

impl LanguageId {
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Java => "java",
        }
    }

    /// Name used in user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::Java => "Java",
        }
    }

    /// File extensions (without dot) handled by this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            LanguageId::Java => &["java"],
        }
    }

    /// Spelling of the inference placeholder in a declaration's type slot
    pub fn placeholder_keyword(&self) -> &'static str {
        match self {
            LanguageId::Java => "var",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "java" => Some(LanguageId::Java),
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup_is_case_insensitive() {
        assert_eq!(LanguageId::from_extension("JAVA"), Some(LanguageId::Java));
        assert_eq!(LanguageId::from_extension("cs"), None);
    }
}
