//! Run orchestration: provider → tree → walk → concurrent downloads.

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use indicatif::ProgressBar;

use crate::course::CourseNode;
use crate::download::fetch::FileFetcher;
use crate::download::state::{DownloadState, Summary};
use crate::download::stream::StreamDownloader;
use crate::download::task::{DownloadTask, Outcome, TaskKind};
use crate::download::walker::walk;
use crate::error::{Error, Result};
use crate::output::{create_item_bar, create_spinner, format_task_result, print_info};
use crate::provider::CourseTreeProvider;

/// Drives one course mirror run.
pub struct Orchestrator {
    fetcher: FileFetcher,
    streamer: Option<Arc<dyn StreamDownloader>>,
    show_downloads: bool,
    show_skipped_downloads: bool,
}

impl Orchestrator {
    pub fn new(fetcher: FileFetcher) -> Self {
        Self {
            fetcher,
            streamer: None,
            show_downloads: true,
            show_skipped_downloads: true,
        }
    }

    /// Use `streamer` for adaptive-stream videos.
    pub fn with_stream_downloader(mut self, streamer: Arc<dyn StreamDownloader>) -> Self {
        self.streamer = Some(streamer);
        self
    }

    /// Configure per-task console output.
    pub fn with_output(mut self, show_downloads: bool, show_skipped_downloads: bool) -> Self {
        self.show_downloads = show_downloads;
        self.show_skipped_downloads = show_skipped_downloads;
        self
    }

    /// Mirror the course from `provider` into `base_dir`.
    ///
    /// Structural and precondition errors end the run before any download is
    /// dispatched. Individual download failures are counted in the summary.
    pub async fn run(&self, provider: &dyn CourseTreeProvider, base_dir: &Path) -> Result<Summary> {
        tracing::debug!("Fetching course document from {} provider", provider.name());
        let spinner = self
            .show_downloads
            .then(|| create_spinner("Fetching course tree..."));
        let document = provider.fetch_document().await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let course = CourseNode::from_value(document?)?;

        if course.has_stream_videos() && self.streamer.is_none() {
            return Err(Error::StreamDownloaderNotFound);
        }

        let walked = walk(&course, base_dir)?;
        let mut summary = self.dispatch(walked.tasks).await;
        summary.inline_written = walked.inline_written;
        Ok(summary)
    }

    /// Run every task concurrently and wait for all of them to settle.
    pub async fn dispatch(&self, tasks: Vec<DownloadTask>) -> Summary {
        let state = DownloadState::new(tasks.len());
        let bar = if self.show_downloads {
            create_item_bar(tasks.len() as u64, "Downloading")
        } else {
            ProgressBar::hidden()
        };

        let runs = tasks.iter().map(|task| {
            let state = &state;
            let bar = &bar;
            async move {
                if self.show_downloads {
                    bar.suspend(|| print_info(&format!("Downloading {}...", task.label)));
                }

                let outcome = self.execute(task).await;
                let settled = state.record(&outcome);

                if let Outcome::Failed(reason) = &outcome {
                    tracing::warn!("Failed to download {} from {}: {}", task.label, task.url(), reason);
                }

                let quiet_skip = outcome == Outcome::Skipped && !self.show_skipped_downloads;
                if self.show_downloads && !quiet_skip {
                    let line = format_task_result(settled, state.total(), &task.label, &outcome);
                    bar.suspend(|| println!("{}", line));
                }
                bar.inc(1);
            }
        });

        join_all(runs).await;
        bar.finish_and_clear();

        state.summary()
    }

    async fn execute(&self, task: &DownloadTask) -> Outcome {
        match &task.kind {
            TaskKind::File { url, dest } => self.fetcher.fetch(url, dest).await,
            TaskKind::Stream {
                manifest_url,
                output_dir,
                base_name,
            } => match &self.streamer {
                Some(streamer) => streamer.fetch_stream(manifest_url, output_dir, base_name).await,
                None => Outcome::Failed(Error::StreamDownloaderNotFound.to_string()),
            },
        }
    }
}
