use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::semantic_model::SemanticModel;
use crate::features::semantic::domain::ProjectContext;
use crate::features::syntax::{CompilationUnit, LanguageId};
use crate::shared::models::RewriteError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} does not belong to any compilation context")]
    NoCompilationContext(PathBuf),

    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not valid UTF-8")]
    Encoding(PathBuf),

    #[error("{path} is {size} bytes, limit is {limit}")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{path} has syntax errors (first at line {line})")]
    Syntax { path: PathBuf, line: u32 },

    #[error("language backend failure: {0}")]
    Language(String),
}

impl ProviderError {
    /// A file outside any project is a no-op, not a failure
    pub fn is_missing_context(&self) -> bool {
        matches!(self, ProviderError::NoCompilationContext(_))
    }
}

impl From<ProviderError> for RewriteError {
    fn from(err: ProviderError) -> Self {
        let rewrite = match &err {
            ProviderError::NoCompilationContext(_) => RewriteError::validation(err.to_string()),
            ProviderError::Syntax { path, line } => RewriteError::parse(err.to_string())
                .with_file(path.display().to_string())
                .with_line(*line),
            _ => RewriteError::environment(err.to_string()),
        };
        rewrite.with_source(err)
    }
}

/// Tree and model for one document
pub struct LoadedDocument {
    pub unit: CompilationUnit,
    pub model: Arc<dyn SemanticModel>,
}

impl std::fmt::Debug for LoadedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedDocument")
            .field("path", &self.unit.path())
            .field("language", &self.unit.language())
            .finish_non_exhaustive()
    }
}

/// Syntax/semantic front-end for one language
#[async_trait]
pub trait SemanticProvider: Send + Sync {
    fn language(&self) -> LanguageId;

    /// Whether the file extension belongs to this provider's language
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(LanguageId::from_extension)
            .is_some_and(|lang| lang == self.language())
    }

    async fn load_compilation_unit(
        &self,
        path: &Path,
        context: &ProjectContext,
    ) -> Result<LoadedDocument, ProviderError>;

    fn render_text(&self, unit: &CompilationUnit) -> String {
        unit.render()
    }
}
