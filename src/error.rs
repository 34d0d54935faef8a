//! Error types for the course-mirror application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Failed to read input: {0}")]
    Prompt(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    // Course tree errors
    #[error("Unrecognized course structure: {0}")]
    Structure(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("{failed} of {total} download(s) failed")]
    PartialFailure { failed: usize, total: usize },

    // External tool errors
    #[error("Stream downloader error: {0}")]
    StreamDownloader(String),

    #[error(
        "Stream downloader not found. Install N_m3u8DL-RE (https://github.com/nilaoda/N_m3u8DL-RE/releases) and ensure it's in your PATH."
    )]
    StreamDownloaderNotFound,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const PRECONDITION_ERROR: i32 = 6;
    pub const STRUCTURE_ERROR: i32 = 7;
}
