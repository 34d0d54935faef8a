//! Direct file downloading.

use std::path::Path;

use futures::StreamExt;
use reqwest::{header, Client};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::download::task::Outcome;
use crate::error::{Error, Result};

/// Fetches single URLs to single files, skipping destinations that exist.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    client: Client,
    user_agent: String,
}

impl FileFetcher {
    /// Create a fetcher sending the given user agent.
    pub fn new(user_agent: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }

    /// Download `url` to `dest`.
    ///
    /// An existing `dest` is treated as complete and returns [`Outcome::Skipped`]
    /// without touching the network. On failure the partial file is removed.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Outcome {
        if dest.exists() {
            tracing::debug!("Skipping existing file: {}", dest.display());
            return Outcome::Skipped;
        }

        match self.fetch_to(url, dest).await {
            Ok(()) => Outcome::Downloaded,
            Err(e) => {
                if dest.exists() {
                    if let Err(rm) = tokio::fs::remove_file(dest).await {
                        tracing::warn!("Could not remove partial file {}: {}", dest.display(), rm);
                    }
                }
                Outcome::Failed(e.to_string())
            }
        }
    }

    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<()> {
        let parsed = url::Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Download(format!(
                "Unsupported URL scheme '{}' for {}",
                parsed.scheme(),
                url
            )));
        }

        tracing::debug!("GET {}", url);
        let mut file = File::create(dest).await?;

        let response = self
            .client
            .get(parsed)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download(format!("HTTP {} for URL: {}", status, url)));
        }

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> FileFetcher {
        FileFetcher::new("Mozilla/5.0").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_then_skip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lesson.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("lesson.pdf");
        let url = format!("{}/lesson.pdf", server.uri());

        assert_eq!(fetcher().fetch(&url, &dest).await, Outcome::Downloaded);
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.4");

        assert_eq!(fetcher().fetch(&url, &dest).await, Outcome::Skipped);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_not_found_removes_partial_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing.mp4");
        let url = format!("{}/missing.mp4", server.uri());

        let outcome = fetcher().fetch(&url, &dest).await;
        match outcome {
            Outcome::Failed(reason) => assert!(reason.contains("404")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_fetch_rejects_unknown_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x.bin");

        let outcome = fetcher().fetch("ftp://example.com/x.bin", &dest).await;
        assert!(matches!(outcome, Outcome::Failed(_)));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x.bin");

        // port 9 (discard) is not expected to accept connections in test environments
        let outcome = fetcher().fetch("http://127.0.0.1:9/x.bin", &dest).await;
        assert!(matches!(outcome, Outcome::Failed(_)));
        assert!(!dest.exists());
    }
}
