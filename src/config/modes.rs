//! Platform definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the course tree comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// A course document already saved to disk.
    Local,
    /// The JSON sections API (default).
    #[default]
    Viewer,
    /// Server-rendered course pages with embedded client state.
    Page,
}

impl Platform {
    /// Download directory used when none is configured.
    pub fn default_directory(&self) -> &'static str {
        match self {
            Platform::Local => ".",
            Platform::Viewer => "kiwify",
            Platform::Page => "domestika_courses",
        }
    }

    /// Whether the platform only ever serves adaptive-stream videos.
    pub fn requires_stream_tool(&self) -> bool {
        matches!(self, Platform::Page)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Local => write!(f, "local"),
            Platform::Viewer => write!(f, "viewer"),
            Platform::Page => write!(f, "page"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Platform::Local),
            "viewer" => Ok(Platform::Viewer),
            "page" => Ok(Platform::Page),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Page".parse::<Platform>().unwrap(), Platform::Page);
        assert_eq!(Platform::Viewer.to_string(), "viewer");
        assert!("other".parse::<Platform>().is_err());
    }

    #[test]
    fn test_default_directories() {
        assert_eq!(Platform::Viewer.default_directory(), "kiwify");
        assert_eq!(Platform::Page.default_directory(), "domestika_courses");
        assert!(Platform::Page.requires_stream_tool());
        assert!(!Platform::Viewer.requires_stream_tool());
    }
}
