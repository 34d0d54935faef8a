//! Configuration module.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Platform selection
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, CourseConfig, OptionsConfig};
pub use modes::Platform;
pub use validation::{parse_course_id, validate_config, validate_course_url, validate_token};
