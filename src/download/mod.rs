//! Download module for course content.
//!
//! This module provides:
//! - Course tree walking into download tasks
//! - Direct file fetching
//! - Adaptive-stream video downloading via an external tool
//! - Concurrent dispatch and run statistics

pub mod fetch;
pub mod orchestrator;
pub mod state;
pub mod stream;
pub mod task;
pub mod walker;

pub use fetch::FileFetcher;
pub use orchestrator::Orchestrator;
pub use state::{DownloadState, Summary};
pub use stream::{CliStreamDownloader, StreamDownloader};
pub use task::{DownloadTask, Outcome, TaskKind};
pub use walker::{walk, WalkResult};
