//! Leaf download tasks produced by the tree walk.

use std::fmt;
use std::path::PathBuf;

/// One independent unit of download work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// Human-readable description for progress lines (module/lesson path).
    pub label: String,

    pub kind: TaskKind,
}

/// How a task's bytes are obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// Fetch a URL straight to a file.
    File { url: String, dest: PathBuf },

    /// Hand an adaptive-stream manifest to the stream downloader.
    Stream {
        manifest_url: String,
        output_dir: PathBuf,
        base_name: String,
    },
}

impl DownloadTask {
    pub fn file(label: impl Into<String>, url: impl Into<String>, dest: PathBuf) -> Self {
        Self {
            label: label.into(),
            kind: TaskKind::File {
                url: url.into(),
                dest,
            },
        }
    }

    pub fn stream(
        label: impl Into<String>,
        manifest_url: impl Into<String>,
        output_dir: PathBuf,
        base_name: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            kind: TaskKind::Stream {
                manifest_url: manifest_url.into(),
                output_dir,
                base_name: base_name.into(),
            },
        }
    }

    /// The URL this task fetches.
    pub fn url(&self) -> &str {
        match &self.kind {
            TaskKind::File { url, .. } => url,
            TaskKind::Stream { manifest_url, .. } => manifest_url,
        }
    }
}

/// Result of a single leaf download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The destination already existed; nothing was fetched.
    Skipped,
    Downloaded,
    Failed(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Skipped => write!(f, "skipped"),
            Outcome::Downloaded => write!(f, "downloaded"),
            Outcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
