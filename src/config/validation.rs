//! Configuration validation logic.

use crate::config::loader::Config;
use crate::config::modes::Platform;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Placeholder fragments that mark a value as never filled in.
const PLACEHOLDERS: &[&str] = &["replaceme", "your_token", "your-token", "<token>"];

/// Validate the configuration for the selected platform.
pub fn validate_config(config: &Config) -> Result<()> {
    match config.options.platform {
        Platform::Local => {
            let path = config
                .course
                .json_path
                .as_ref()
                .ok_or_else(|| Error::MissingConfig("json_path".to_string()))?;
            if config.options.download_directory.is_none() {
                return Err(Error::MissingConfig("output directory".to_string()));
            }
            if !path.is_file() {
                return Err(Error::ConfigValidation {
                    field: "json_path".to_string(),
                    message: format!("{} is not a file", path.display()),
                });
            }
        }
        Platform::Viewer => {
            let id = config
                .course
                .id
                .as_deref()
                .ok_or_else(|| Error::MissingConfig("course id".to_string()))?;
            parse_course_id(id)?;
            validate_token("bearer_token", &config.account.bearer_token)?;
        }
        Platform::Page => {
            let url = config
                .course
                .url
                .as_deref()
                .ok_or_else(|| Error::MissingConfig("course url".to_string()))?;
            validate_course_url(url)?;
            validate_token("session_cookie", &config.account.session_cookie)?;
            validate_token("access_token", &config.account.access_token)?;
            validate_token("refresh_token", &config.account.refresh_token)?;
        }
    }

    Ok(())
}

/// Validate a credential value.
pub fn validate_token(field: &str, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    let lower = token.to_lowercase();
    if PLACEHOLDERS.iter().any(|p| lower.contains(p)) {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Value appears to be a placeholder. Please provide your actual credentials."
                .to_string(),
        });
    }

    if token.chars().any(char::is_whitespace) {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Value must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Extract a course id from a bare id or a course URL.
///
/// For URLs the last non-empty path segment is taken.
pub fn parse_course_id(input: &str) -> Result<String> {
    let input = input.trim();

    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        let url = Url::parse(input)?;
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .ok_or_else(|| Error::ConfigValidation {
                field: "course_id".to_string(),
                message: format!("Could not extract course id from URL: {}", input),
            })?
    } else {
        input.to_string()
    };

    let id_pattern = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$")
        .map_err(|e| Error::Config(format!("Invalid course id pattern: {}", e)))?;
    if id_pattern.is_match(&candidate) {
        return Ok(candidate);
    }

    Err(Error::ConfigValidation {
        field: "course_id".to_string(),
        message: format!(
            "Invalid course id: '{}'. Only letters, digits, hyphens and underscores allowed.",
            input
        ),
    })
}

/// Validate a course page URL.
pub fn validate_course_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            field: "course_url".to_string(),
            message: format!("Unsupported scheme '{}', expected http or https", url.scheme()),
        });
    }
    if url.host_str().is_none() {
        return Err(Error::ConfigValidation {
            field: "course_url".to_string(),
            message: format!("URL has no host: {}", input),
        });
    }

    Ok(url)
}
