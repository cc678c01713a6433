//! Project context handed to the provider on load

use std::path::{Path, PathBuf};

/// 4 MiB
pub const DEFAULT_MAX_FILE_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Files outside this directory have no compilation context
    pub root: Option<PathBuf>,
    /// Load files whose parse contains ERROR nodes
    pub allow_syntax_errors: bool,
    pub max_file_bytes: u64,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            root: None,
            allow_syntax_errors: false,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl ProjectContext {
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Whether `path` belongs to this project
    pub fn contains(&self, path: &Path) -> bool {
        match &self.root {
            None => true,
            Some(root) => {
                let root = root.canonicalize().unwrap_or_else(|_| root.clone());
                let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
                path.starts_with(root)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_without_root() {
        assert!(ProjectContext::default().contains(Path::new("/anywhere/A.java")));
    }

    #[test]
    fn test_contains_with_root() {
        let dir = tempfile::tempdir().unwrap();
        let inside = dir.path().join("A.java");
        std::fs::write(&inside, "class A {}").unwrap();
        let ctx = ProjectContext::default().with_root(dir.path());
        assert!(ctx.contains(&inside));
        assert!(!ctx.contains(Path::new("/definitely/not/here/B.java")));
    }
}
