//! Directory layout and metadata files.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::fs::naming::{is_dot_name, sanitize_segment};

/// Metadata file written at the course root.
pub const COURSE_METADATA: &str = "course.json";

/// Metadata file written in every module directory.
pub const MODULE_METADATA: &str = "module.json";

/// Metadata file written in every nested lesson directory.
pub const LESSON_METADATA: &str = "lesson.json";

/// File holding a lesson's inline HTML body.
pub const INLINE_CONTENT_FILE: &str = "content.html";

/// File name used for video thumbnails.
pub const THUMBNAIL_FILE: &str = "thumbnail.png";

/// Fallback course folder name when the payload carries none.
pub const DEFAULT_COURSE_NAME: &str = "downloads";

/// Get the course folder under the download root.
pub fn get_course_folder(base_dir: &Path, course_name: &str) -> PathBuf {
    let name = if course_name.trim().is_empty() || is_dot_name(course_name) {
        DEFAULT_COURSE_NAME
    } else {
        course_name
    };
    base_dir.join(sanitize_segment(name))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Write a raw payload as pretty-printed JSON into `dir/file_name`.
pub fn write_metadata<T: Serialize + ?Sized>(dir: &Path, file_name: &str, payload: &T) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let content = serde_json::to_string_pretty(payload)?;
    std::fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_course_folder() {
        let path = get_course_folder(Path::new("/downloads"), "Rust: the course");
        assert_eq!(path, PathBuf::from("/downloads/Rust_ the course"));

        let path = get_course_folder(Path::new("/downloads"), "   ");
        assert_eq!(path, PathBuf::from("/downloads/downloads"));

        for name in [".", "..", " .. "] {
            let path = get_course_folder(Path::new("/downloads"), name);
            assert_eq!(path, PathBuf::from("/downloads/downloads"));
        }
    }

    #[test]
    fn test_write_metadata_pretty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_metadata(dir.path(), MODULE_METADATA, &json!({"name": "m"})).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, "{\n  \"name\": \"m\"\n}");
    }

    #[test]
    fn test_ensure_dir_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
