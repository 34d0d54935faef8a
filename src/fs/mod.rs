//! Filesystem module.
//!
//! Provides:
//! - Path segment naming and sanitization
//! - Course directory layout and metadata files

pub mod naming;
pub mod paths;

pub use naming::{file_name_or, is_dot_name, sanitize_segment, segment};
pub use paths::{ensure_dir, get_course_folder, write_metadata};
