//! Pre-fetched course document on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::provider::CourseTreeProvider;

/// Reads a course document from a local JSON file.
pub struct LocalFileProvider {
    path: PathBuf,
}

impl LocalFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CourseTreeProvider for LocalFileProvider {
    async fn fetch_document(&self) -> Result<Value> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Course file not found: {}", self.path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        Ok(serde_json::from_str(&text)?)
    }

    fn name(&self) -> &'static str {
        "local-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.json");
        std::fs::write(&path, r#"{"modules": []}"#).unwrap();

        let doc = assert_ok!(LocalFileProvider::new(&path).fetch_document().await);
        assert_eq!(doc, serde_json::json!({"modules": []}));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = LocalFileProvider::new("/nonexistent/course.json")
            .fetch_document()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.json");
        std::fs::write(&path, "not json").unwrap();

        let err = assert_err!(LocalFileProvider::new(&path).fetch_document().await);
        assert!(matches!(err, Error::Json(_)));
    }
}
