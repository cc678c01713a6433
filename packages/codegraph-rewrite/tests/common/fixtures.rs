//! Test fixture generators
//!
//! Java sources and throwaway project directories.

use std::path::PathBuf;

use tempfile::TempDir;

/// Temporary project holding one or more Java files
pub struct JavaProject {
    pub dir: TempDir,
}

impl JavaProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp project"),
        }
    }

    /// Write `source` to `name` inside the project and return its path
    pub fn file(&self, name: &str, source: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create package dir");
        }
        std::fs::write(&path, source).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("read fixture")
    }
}

/// Wrap statements in `class {name} { void run() { ... } }`
pub fn fixture_method_body(class_name: &str, statements: &[&str]) -> String {
    let body: String = statements
        .iter()
        .map(|s| format!("        {s}\n"))
        .collect();
    format!("class {class_name} {{\n    void run() {{\n{body}    }}\n}}\n")
}

/// A method with `n` integer `var` declarations
pub fn fixture_n_int_vars(class_name: &str, n: usize) -> String {
    let statements: Vec<String> = (0..n).map(|i| format!("var v{i} = {i};")).collect();
    let refs: Vec<&str> = statements.iter().map(String::as_str).collect();
    fixture_method_body(class_name, &refs)
}
