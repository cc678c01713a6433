//! Java provider: tree-sitter-java syntax + local semantic model

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::java_analyzer::JavaAnalyzer;
use crate::features::semantic::domain::ProjectContext;
use crate::features::semantic::ports::{LoadedDocument, ProviderError, SemanticProvider};
use crate::features::syntax::{CompilationUnit, LanguageId, LineEnding, TreeSitterBuilder};

#[derive(Debug, Default, Clone, Copy)]
pub struct JavaProvider;

impl JavaProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SemanticProvider for JavaProvider {
    fn language(&self) -> LanguageId {
        LanguageId::Java
    }

    async fn load_compilation_unit(
        &self,
        path: &Path,
        context: &ProjectContext,
    ) -> Result<LoadedDocument, ProviderError> {
        if !context.contains(path) {
            return Err(ProviderError::NoCompilationContext(path.to_path_buf()));
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| ProviderError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        if metadata.len() > context.max_file_bytes {
            return Err(ProviderError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: context.max_file_bytes,
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ProviderError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let source = String::from_utf8(bytes).map_err(|_| ProviderError::Encoding(path.to_path_buf()))?;

        let built = TreeSitterBuilder::java()
            .build(&source)
            .map_err(|e| ProviderError::Language(e.to_string()))?;
        if built.has_errors() {
            let line = built.errors.first().map_or(0, |span| span.start_line);
            if !context.allow_syntax_errors {
                return Err(ProviderError::Syntax {
                    path: path.to_path_buf(),
                    line,
                });
            }
            warn!(path = %path.display(), line, "loading file with syntax errors");
        }

        let siblings = same_package_types(path).await;
        let model = JavaAnalyzer::new(siblings).analyze(&built.root);
        debug!(
            path = %path.display(),
            slots = model.slot_count(),
            "java compilation unit loaded"
        );

        let unit = CompilationUnit::new(
            path.to_path_buf(),
            LanguageId::Java,
            Arc::new(built.root),
            LineEnding::detect(&source),
            built.next_node_id,
        );
        Ok(LoadedDocument {
            unit,
            model: Arc::new(model),
        })
    }
}

/// Top-level type names of the other `.java` files in the same directory
async fn same_package_types(path: &Path) -> Vec<String> {
    let Some(dir) = path.parent() else {
        return Vec::new();
    };
    let own_stem = path.file_stem().and_then(|s| s.to_str());
    let mut names = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return names;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let entry_path = entry.path();
        let is_java = entry_path.extension().and_then(|e| e.to_str()) == Some("java");
        let stem = entry_path.file_stem().and_then(|s| s.to_str());
        match stem {
            Some(stem) if is_java && Some(stem) != own_stem => names.push(stem.to_string()),
            _ => {}
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::semantic::domain::TypeKind;
    use crate::features::syntax::NodeId;

    fn var_slots(unit: &CompilationUnit) -> Vec<NodeId> {
        unit.root()
            .descendants()
            .filter(|n| n.field.as_deref() == Some("type") && n.text() == "var")
            .map(|n| n.id)
            .collect()
    }

    #[tokio::test]
    async fn test_load_types_var_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.java");
        std::fs::write(&path, "class A { void f() { var x = 1L; } }\n").unwrap();

        let doc = JavaProvider::new()
            .load_compilation_unit(&path, &ProjectContext::default())
            .await
            .unwrap();
        let slots = var_slots(&doc.unit);
        assert_eq!(slots.len(), 1);
        let symbol = doc.model.type_of(slots[0]).unwrap();
        assert_eq!(symbol.kind, TypeKind::Concrete);
        assert_eq!(symbol.fully_qualified, "long");
    }

    #[tokio::test]
    async fn test_outside_root_has_no_context() {
        let project = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let path = elsewhere.path().join("B.java");
        std::fs::write(&path, "class B {}").unwrap();

        let ctx = ProjectContext::default().with_root(project.path());
        let err = JavaProvider::new().load_compilation_unit(&path, &ctx).await.unwrap_err();
        assert!(err.is_missing_context());
    }

    #[tokio::test]
    async fn test_syntax_errors_rejected_unless_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("C.java");
        std::fs::write(&path, "class C { void f() { var x = ; } }").unwrap();

        let err = JavaProvider::new()
            .load_compilation_unit(&path, &ProjectContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Syntax { line: 1, .. }));

        let lenient = ProjectContext {
            allow_syntax_errors: true,
            ..Default::default()
        };
        assert!(JavaProvider::new().load_compilation_unit(&path, &lenient).await.is_ok());
    }

    #[tokio::test]
    async fn test_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("D.java");
        std::fs::write(&path, "class D {}").unwrap();
        let ctx = ProjectContext {
            max_file_bytes: 4,
            ..Default::default()
        };
        let err = JavaProvider::new().load_compilation_unit(&path, &ctx).await.unwrap_err();
        assert!(matches!(err, ProviderError::TooLarge { size: 10, limit: 4, .. }));
    }

    #[tokio::test]
    async fn test_same_package_siblings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Helper.java"), "class Helper {}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        let path = dir.path().join("Main.java");
        std::fs::write(&path, "class Main {}").unwrap();

        let names = same_package_types(&path).await;
        assert_eq!(names, vec!["Helper".to_string()]);
    }
}
