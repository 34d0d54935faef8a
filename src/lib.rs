//! Course Mirror - mirror online course trees to disk.
//!
//! A course is a tree of sections, modules and lessons. This library turns a
//! course document from one of several providers into a directory hierarchy
//! of metadata files, inline lesson bodies and downloaded media.
//!
//! # Features
//!
//! - Local JSON documents, the viewer sections API, or scraped course pages
//! - Deterministic directory layout with index-prefixed, sanitized names
//! - Concurrent file downloads that skip anything already on disk
//! - Adaptive-stream videos through the external N_m3u8DL-RE tool
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use course_mirror::{FileFetcher, LocalFileProvider, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = LocalFileProvider::new("course.json");
//!     let orchestrator = Orchestrator::new(FileFetcher::new("Mozilla/5.0")?);
//!
//!     let summary = orchestrator.run(&provider, Path::new("downloads")).await?;
//!     println!("{} of {} downloads succeeded", summary.succeeded(), summary.total);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod course;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;
pub mod provider;

// Re-exports for convenience
pub use config::{Config, Platform};
pub use course::{CourseNode, LessonContent};
pub use download::{
    CliStreamDownloader, DownloadTask, FileFetcher, Orchestrator, Outcome, StreamDownloader,
    Summary,
};
pub use error::{Error, Result};
pub use provider::{CourseTreeProvider, LocalFileProvider, PageProvider, ViewerProvider};
