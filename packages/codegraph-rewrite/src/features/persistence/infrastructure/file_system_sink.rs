//! Overwrites documents in place (UTF-8, no backup)

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::features::persistence::ports::{DocumentSink, SinkError};

#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemSink;

impl FileSystemSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentSink for FileSystemSink {
    async fn write_document(&self, path: &Path, text: &str) -> Result<(), SinkError> {
        tokio::fs::write(path, text.as_bytes())
            .await
            .map_err(|source| SinkError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), bytes = text.len(), "document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{ErrorKind, RewriteError};

    #[tokio::test]
    async fn test_write_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.java");
        std::fs::write(&path, "old").unwrap();

        FileSystemSink::new().write_document(&path, "new content").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new content");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_maps_to_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("A.java");

        let err = FileSystemSink::new().write_document(&path, "x").await.unwrap_err();
        let err: RewriteError = err.into();
        assert_eq!(err.kind, ErrorKind::IO);
        assert!(err.file_path.is_some());
    }
}
