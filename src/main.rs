//! Course Mirror - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use course_mirror::{
    api::{CatalogApi, PageCredentials, ViewerApi},
    cli::{prompt_missing, Args},
    config::{parse_course_id, validate_config, validate_course_url, Config, Platform},
    download::{CliStreamDownloader, FileFetcher, Orchestrator},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_success, print_summary, print_warning,
    },
    provider::{CourseTreeProvider, LocalFileProvider, PageProvider, ViewerProvider},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_code_for(&e) as u8)
        }
    }
}

fn exit_code_for(error: &Error) -> i32 {
    match error {
        Error::Config(_)
        | Error::ConfigValidation { .. }
        | Error::MissingConfig(_)
        | Error::Prompt(_)
        | Error::TomlParse(_)
        | Error::UrlParse(_) => exit_codes::CONFIG_ERROR,
        Error::Authentication(_) | Error::Api(_) | Error::Http(_) => exit_codes::API_ERROR,
        Error::Download(_) | Error::PartialFailure { .. } => exit_codes::DOWNLOAD_ERROR,
        Error::StreamDownloaderNotFound | Error::StreamDownloader(_) => {
            exit_codes::PRECONDITION_ERROR
        }
        Error::Structure(_) | Error::Json(_) => exit_codes::STRUCTURE_ERROR,
        Error::Io(_) => exit_codes::UNEXPECTED_ERROR,
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration, then let CLI arguments override it
    if !args.config.exists() {
        print_warning(&format!(
            "Configuration file not found: {}. Using defaults with CLI arguments",
            args.config.display()
        ));
    }
    let mut config = Config::load_or_default(&args.config)?;
    args.merge_into_config(&mut config);

    prompt_missing(&mut config)?;
    validate_config(&config)?;

    let platform = config.options.platform;

    // The stream tool is located once, before any provider call
    let located = CliStreamDownloader::locate(
        config.options.stream_tool.as_deref(),
        &config.options.subtitle_language,
    );
    let streamer = match located {
        Ok(streamer) => Some(streamer),
        Err(e) if platform.requires_stream_tool() => return Err(e),
        Err(e) => {
            tracing::debug!("Continuing without stream downloader: {}", e);
            None
        }
    };

    let provider = build_provider(&config)?;
    let download_dir = config.download_directory();

    print_config_summary(
        &platform.to_string(),
        &course_label(&config),
        &download_dir.display().to_string(),
    );

    let mut orchestrator = Orchestrator::new(FileFetcher::new(config.account.user_agent.clone())?)
        .with_output(
            config.options.show_downloads,
            config.options.show_skipped_downloads,
        );
    if let Some(streamer) = streamer {
        tracing::debug!("Using stream downloader at {}", streamer.binary_path().display());
        orchestrator = orchestrator.with_stream_downloader(Arc::new(streamer));
    }

    let summary = orchestrator.run(provider.as_ref(), &download_dir).await?;
    print_summary(&summary, &download_dir);

    if summary.has_failures() {
        return Err(Error::PartialFailure {
            failed: summary.failed,
            total: summary.total,
        });
    }

    print_success("Download complete!");
    Ok(())
}

fn build_provider(config: &Config) -> Result<Box<dyn CourseTreeProvider>> {
    let account = &config.account;

    match config.options.platform {
        Platform::Local => {
            let path = config
                .course
                .json_path
                .clone()
                .ok_or_else(|| Error::MissingConfig("json_path".into()))?;
            Ok(Box::new(LocalFileProvider::new(path)))
        }
        Platform::Viewer => {
            let id = parse_course_id(config.course.id.as_deref().unwrap_or_default())?;
            let api = ViewerApi::new(account.bearer_token.trim(), account.user_agent.clone())?;
            Ok(Box::new(ViewerProvider::new(api, id)))
        }
        Platform::Page => {
            let url = validate_course_url(config.course.url.as_deref().unwrap_or_default())?;
            let credentials = PageCredentials::new(
                account.session_cookie.trim(),
                account.access_token.trim(),
                account.refresh_token.trim(),
            )?;
            let api = CatalogApi::new(credentials, &account.user_agent)?;
            Ok(Box::new(PageProvider::new(api, url.as_str())))
        }
    }
}

fn course_label(config: &Config) -> String {
    let label = match config.options.platform {
        Platform::Local => config.course.json_path.as_ref().map(|p| p.display().to_string()),
        Platform::Viewer => config.course.id.clone(),
        Platform::Page => config.course.url.clone(),
    };
    label.unwrap_or_default()
}
