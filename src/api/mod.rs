//! Platform API module.
//!
//! This module provides:
//! - HTTP client for the viewer platform's course-tree endpoint
//! - HTTP client for the page platform's rendered pages and JSON:API
//! - Credential blob handling
//! - API response types

pub mod auth;
pub mod catalog;
pub mod types;
pub mod viewer;

pub use auth::PageCredentials;
pub use catalog::CatalogApi;
pub use viewer::ViewerApi;
