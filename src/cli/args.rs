//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, Platform};

/// Course mirror CLI.
#[derive(Parser, Debug)]
#[command(
    name = "course-mirror",
    version,
    about = "Mirror online course trees to disk",
    long_about = "A CLI tool to mirror course modules, lessons, videos and attachments to a local directory.\n\n\
                  Reads a saved course document, the viewer sections API, or authenticated course pages."
)]
pub struct Args {
    /// Saved course JSON document to mirror without network access.
    #[arg(requires = "output")]
    pub json_path: Option<PathBuf>,

    /// Output directory for the local course document.
    pub output: Option<PathBuf>,

    /// Platform to fetch the course tree from.
    #[arg(short, long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Course id (viewer) or course URL (page).
    #[arg(long)]
    pub course: Option<String>,

    /// Viewer platform bearer token.
    #[arg(short, long, env = "COURSE_MIRROR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Page platform session cookie.
    #[arg(long = "session", env = "COURSE_MIRROR_SESSION", hide_env_values = true)]
    pub session_cookie: Option<String>,

    /// Page platform access token.
    #[arg(long = "access-token", env = "COURSE_MIRROR_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Page platform refresh token.
    #[arg(long = "refresh-token", env = "COURSE_MIRROR_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "course-mirror.toml")]
    pub config: PathBuf,

    /// Subtitle language for stream downloads.
    #[arg(long = "subtitle-lang")]
    pub subtitle_language: Option<String>,

    /// Path to the N_m3u8DL-RE binary.
    #[arg(long = "stream-tool")]
    pub stream_tool: Option<PathBuf>,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI platform argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlatformArg {
    /// Saved course document on disk.
    Local,
    /// JSON sections API.
    Viewer,
    /// Authenticated course pages.
    Page,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Local => Platform::Local,
            PlatformArg::Viewer => Platform::Viewer,
            PlatformArg::Page => Platform::Page,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // A positional document selects the local platform
        if let Some(path) = self.json_path {
            config.options.platform = Platform::Local;
            config.course.json_path = Some(path);
            config.options.download_directory = self.output;
        }

        if let Some(platform) = self.platform {
            config.options.platform = platform.into();
        }

        if let Some(course) = self.course {
            match config.options.platform {
                Platform::Page => config.course.url = Some(course),
                _ => config.course.id = Some(course),
            }
        }

        // Override account settings if provided
        if let Some(token) = self.token {
            config.account.bearer_token = token;
        }

        if let Some(session) = self.session_cookie {
            config.account.session_cookie = session;
        }

        if let Some(access) = self.access_token {
            config.account.access_token = access;
        }

        if let Some(refresh) = self.refresh_token {
            config.account.refresh_token = refresh;
        }

        // Override options if provided
        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if let Some(lang) = self.subtitle_language {
            config.options.subtitle_language = lang;
        }

        if let Some(tool) = self.stream_tool {
            config.options.stream_tool = Some(tool);
        }

        if self.quiet {
            config.options.show_downloads = false;
            config.options.show_skipped_downloads = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("course-mirror").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_selects_local() {
        let mut config = Config::default();
        parse(&["course.json", "out"]).merge_into_config(&mut config);

        assert_eq!(config.options.platform, Platform::Local);
        assert_eq!(config.course.json_path, Some(PathBuf::from("course.json")));
        assert_eq!(config.download_directory(), PathBuf::from("out"));
    }

    #[test]
    fn test_json_path_requires_output() {
        assert!(Args::try_parse_from(["course-mirror", "course.json"]).is_err());
    }

    #[test]
    fn test_course_flag_follows_platform() {
        let mut config = Config::default();
        parse(&["--platform", "page", "--course", "https://x.org/courses/1-a"])
            .merge_into_config(&mut config);
        assert_eq!(config.course.url.as_deref(), Some("https://x.org/courses/1-a"));
        assert!(config.course.id.is_none());

        let mut config = Config::default();
        parse(&["--course", "abc", "--token", "t0k"]).merge_into_config(&mut config);
        assert_eq!(config.course.id.as_deref(), Some("abc"));
        assert_eq!(config.account.bearer_token, "t0k");
    }

    #[test]
    fn test_quiet_and_options() {
        let mut config = Config::default();
        parse(&["-q", "--subtitle-lang", "en", "--stream-tool", "/opt/tool", "-d", "dl"])
            .merge_into_config(&mut config);

        assert!(!config.options.show_downloads);
        assert!(!config.options.show_skipped_downloads);
        assert_eq!(config.options.subtitle_language, "en");
        assert_eq!(config.options.stream_tool, Some(PathBuf::from("/opt/tool")));
        assert_eq!(config.download_directory(), PathBuf::from("dl"));
    }
}
