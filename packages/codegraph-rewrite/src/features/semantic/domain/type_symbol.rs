//! Resolved type symbols and name bindings

use serde::{Deserialize, Serialize};

/// Classification of a resolved type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Nameable type with a fully-qualified spelling
    Concrete,
    /// The compiler could not give the expression a type (null, lambdas, bad code)
    Error,
    /// Type exists but has no spellable name
    Anonymous,
    /// The model has no information
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub kind: TypeKind,
    /// Unambiguous spelling (`java.util.List<java.lang.String>`)
    pub fully_qualified: String,
    /// Short human-readable form (`List<String>`)
    pub display: String,
}

impl TypeSymbol {
    pub fn concrete(fully_qualified: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Concrete,
            fully_qualified: fully_qualified.into(),
            display: display.into(),
        }
    }

    pub fn error(display: impl Into<String>) -> Self {
        let display = display.into();
        Self {
            kind: TypeKind::Error,
            fully_qualified: display.clone(),
            display,
        }
    }

    pub fn anonymous(display: impl Into<String>) -> Self {
        let display = display.into();
        Self {
            kind: TypeKind::Anonymous,
            fully_qualified: String::new(),
            display,
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: TypeKind::Unknown,
            fully_qualified: String::new(),
            display: "?".to_string(),
        }
    }

    pub fn is_concrete(&self) -> bool {
        self.kind == TypeKind::Concrete
    }
}

impl std::fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TypeKind::Concrete => f.write_str(&self.fully_qualified),
            _ => write!(f, "<{:?}: {}>", self.kind, self.display),
        }
    }
}

/// What a simple type name refers to at a location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameBinding {
    /// Binds to exactly this fully-qualified type
    Type(String),
    /// More than one candidate is visible
    Ambiguous,
    /// Nothing visible with this name
    Unbound,
}

impl NameBinding {
    pub fn binds_to(&self, fully_qualified: &str) -> bool {
        matches!(self, NameBinding::Type(fqn) if fqn == fully_qualified)
    }
}
