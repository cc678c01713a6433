use crate::features::syntax::CompilationUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Shorten names at all; when off only the markers are removed
    pub enabled: bool,
    /// Add an import when no suffix of a name binds in scope
    pub add_imports: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            add_imports: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimplifiedUnit {
    pub unit: CompilationUnit,
    /// Fully-qualified names of the imports added, sorted
    pub imports_added: Vec<String>,
    pub names_shortened: usize,
}
