//! Configuration structures and loading logic.

use crate::config::modes::Platform;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub course: CourseConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Platform credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Page platform session cookie value.
    #[serde(default)]
    pub session_cookie: String,

    /// Page platform access token.
    #[serde(default)]
    pub access_token: String,

    /// Page platform refresh token.
    #[serde(default)]
    pub refresh_token: String,

    /// Viewer platform bearer token.
    #[serde(default)]
    pub bearer_token: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Which course to mirror.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Course identifier (viewer platform).
    #[serde(default)]
    pub id: Option<String>,

    /// Course page URL (page platform).
    #[serde(default)]
    pub url: Option<String>,

    /// Saved course document (local platform).
    #[serde(default)]
    pub json_path: Option<PathBuf>,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    #[serde(default)]
    pub platform: Platform,

    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Subtitle language passed to the stream tool.
    #[serde(default = "default_subtitle_language")]
    pub subtitle_language: String,

    /// Explicit path to the stream tool binary.
    #[serde(default)]
    pub stream_tool: Option<PathBuf>,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Whether to show skipped downloads.
    #[serde(default = "default_true")]
    pub show_skipped_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            download_directory: None,
            subtitle_language: default_subtitle_language(),
            stream_tool: None,
            show_downloads: true,
            show_skipped_downloads: true,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            session_cookie: String::new(),
            access_token: String::new(),
            refresh_token: String::new(),
            bearer_token: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string()
}

fn default_subtitle_language() -> String {
    "pt".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No configuration file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the effective download directory for the configured platform.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.options.platform.default_directory()))
    }
}
