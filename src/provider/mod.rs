//! Course tree providers.
//!
//! A provider produces the raw course document; [`crate::course::CourseNode`]
//! turns it into a tree. All providers emit the same document shape:
//! `{"course": {"name", "sections" | "modules"}}` or the bare inner object.

pub mod local;
pub mod page;
pub mod viewer;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use local::LocalFileProvider;
pub use page::PageProvider;
pub use viewer::ViewerProvider;

/// Source of a raw course document.
#[async_trait]
pub trait CourseTreeProvider: Send + Sync {
    /// Produce the course document.
    async fn fetch_document(&self) -> Result<Value>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}
