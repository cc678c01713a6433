use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::models::RewriteError;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document store rejected {path}: {reason}")]
    Rejected { path: PathBuf, reason: String },
}

impl From<SinkError> for RewriteError {
    fn from(err: SinkError) -> Self {
        let path = match &err {
            SinkError::Write { path, .. } | SinkError::Rejected { path, .. } => path.display().to_string(),
        };
        RewriteError::io(err.to_string()).with_file(path).with_source(err)
    }
}

/// Destination for rewritten documents
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Replace the whole content of `path` with `text`
    async fn write_document(&self, path: &Path, text: &str) -> Result<(), SinkError>;
}
