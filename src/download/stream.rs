//! Adaptive-stream downloading through an external tool.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::download::task::Outcome;
use crate::error::{Error, Result};

/// Binary name searched on `PATH` when no explicit path is configured.
pub const STREAM_TOOL_BINARY: &str = "N_m3u8DL-RE";

/// Video selection: best rendition up to 1080p, preferring HEVC.
const VIDEO_SELECTION: &str = "res=1080*:codec=hvc1:for=best";

/// Downloads an adaptive-stream manifest into a single muxed file.
#[async_trait]
pub trait StreamDownloader: Send + Sync {
    /// Fetch the stream at `manifest_url` into `output_dir/base_name.*`.
    ///
    /// Returns [`Outcome::Failed`] only when the video itself could not be
    /// downloaded; missing subtitles are tolerated.
    async fn fetch_stream(&self, manifest_url: &str, output_dir: &Path, base_name: &str) -> Outcome;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// [`StreamDownloader`] backed by the `N_m3u8DL-RE` command-line tool.
#[derive(Debug, Clone)]
pub struct CliStreamDownloader {
    binary_path: PathBuf,
    subtitle_language: String,
}

impl CliStreamDownloader {
    /// Create a downloader with an explicit binary path.
    pub fn new(binary_path: PathBuf, subtitle_language: impl Into<String>) -> Self {
        Self {
            binary_path,
            subtitle_language: subtitle_language.into(),
        }
    }

    /// Find the tool, either at `configured` or on `PATH`.
    ///
    /// Called once before a run starts; a missing tool is fatal.
    pub fn locate(configured: Option<&Path>, subtitle_language: &str) -> Result<Self> {
        let binary_path = match configured {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                tracing::debug!("Configured stream tool not found at {}", path.display());
                return Err(Error::StreamDownloaderNotFound);
            }
            None => which::which(STREAM_TOOL_BINARY).map_err(|_| Error::StreamDownloaderNotFound)?,
        };

        tracing::debug!("Using stream tool at {}", binary_path.display());
        Ok(Self::new(binary_path, subtitle_language))
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    async fn run(&self, args: Vec<String>) -> Result<()> {
        tracing::debug!("{} {}", self.binary_path.display(), args.join(" "));

        let output = Command::new(&self.binary_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::StreamDownloaderNotFound
                } else {
                    Error::StreamDownloader(format!("Failed to run stream tool: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::StreamDownloader(format!(
                "exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

fn base_args(manifest_url: &str, output_dir: &Path, base_name: &str) -> Vec<String> {
    vec![
        manifest_url.to_string(),
        "--save-dir".to_string(),
        output_dir.display().to_string(),
        "--save-name".to_string(),
        base_name.trim_end().to_string(),
    ]
}

/// Arguments for the video pass.
pub fn video_args(manifest_url: &str, output_dir: &Path, base_name: &str) -> Vec<String> {
    let mut args = base_args(manifest_url, output_dir, base_name);
    args.extend(["-sv".to_string(), VIDEO_SELECTION.to_string()]);
    args
}

/// Arguments for the subtitle pass.
pub fn subtitle_args(
    manifest_url: &str,
    output_dir: &Path,
    base_name: &str,
    language: &str,
) -> Vec<String> {
    let mut args = base_args(manifest_url, output_dir, base_name);
    args.extend([
        "--auto-subtitle-fix".to_string(),
        "--sub-format".to_string(),
        "SRT".to_string(),
        "--select-subtitle".to_string(),
        format!("lang={}:for=all", language),
    ]);
    args
}

#[async_trait]
impl StreamDownloader for CliStreamDownloader {
    async fn fetch_stream(&self, manifest_url: &str, output_dir: &Path, base_name: &str) -> Outcome {
        if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
            return Outcome::Failed(e.to_string());
        }

        if let Err(e) = self.run(video_args(manifest_url, output_dir, base_name)).await {
            return Outcome::Failed(e.to_string());
        }

        let subtitles = subtitle_args(manifest_url, output_dir, base_name, &self.subtitle_language);
        if let Err(e) = self.run(subtitles).await {
            tracing::debug!("No subtitles for {}: {}", base_name, e);
        }

        Outcome::Downloaded
    }

    fn name(&self) -> &'static str {
        "n-m3u8dl-re"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_args() {
        let args = video_args("https://cdn/master.m3u8", Path::new("/out/1_Unit"), "0_Intro ");
        assert_eq!(
            args,
            [
                "https://cdn/master.m3u8",
                "--save-dir",
                "/out/1_Unit",
                "--save-name",
                "0_Intro",
                "-sv",
                "res=1080*:codec=hvc1:for=best",
            ]
        );
    }

    #[test]
    fn test_subtitle_args() {
        let args = subtitle_args("https://cdn/master.m3u8", Path::new("/out"), "0_Intro", "pt");
        assert_eq!(&args[5..], ["--auto-subtitle-fix", "--sub-format", "SRT", "--select-subtitle", "lang=pt:for=all"]);
    }

    #[test]
    fn test_locate_missing_configured_path() {
        let err = CliStreamDownloader::locate(Some(Path::new("/nonexistent/N_m3u8DL-RE")), "pt")
            .unwrap_err();
        assert!(matches!(err, Error::StreamDownloaderNotFound));
    }

    #[test]
    fn test_locate_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("N_m3u8DL-RE");
        std::fs::write(&bin, b"").unwrap();

        let downloader = CliStreamDownloader::locate(Some(&bin), "en").unwrap();
        assert_eq!(downloader.binary_path(), bin.as_path());
    }

    #[tokio::test]
    async fn test_fetch_stream_fails_when_tool_fails() {
        // `false` exits non-zero regardless of arguments
        let Ok(bin) = which::which("false") else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let downloader = CliStreamDownloader::new(bin, "pt");

        let outcome = downloader
            .fetch_stream("https://cdn/master.m3u8", dir.path(), "0_Intro")
            .await;
        assert!(matches!(outcome, Outcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_fetch_stream_succeeds_when_tool_succeeds() {
        let Ok(bin) = which::which("true") else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let downloader = CliStreamDownloader::new(bin, "pt");

        let outcome = downloader
            .fetch_stream("https://cdn/master.m3u8", &dir.path().join("unit"), "0_Intro")
            .await;
        assert_eq!(outcome, Outcome::Downloaded);
        assert!(dir.path().join("unit").is_dir());
    }
}
