//! Parse raw course documents into a [`CourseNode`] tree.
//!
//! Only the root is strict. Modules and lessons are read field by field, so a
//! malformed entry degrades to an empty module or a lesson without content.

use serde_json::Value;

use crate::course::model::*;
use crate::error::{Error, Result};

/// Read `key` as text. Numbers and booleans are rendered; anything else is absent.
fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Like [`text`], treating an empty string as absent.
fn non_empty(value: &Value, key: &str) -> Option<String> {
    text(value, key).filter(|s| !s.is_empty())
}

/// Read `key` as a list, warning when it has an unexpected type.
fn list<'a>(value: &'a Value, key: &str, owner: &str) -> &'a [Value] {
    match value.get(key) {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => &[],
        Some(other) => {
            tracing::warn!("Ignoring '{}' of {}: expected a list, got {}", key, owner, other);
            &[]
        }
    }
}

impl CourseNode {
    /// Build a course tree from a raw document.
    ///
    /// Accepts the tree either at the top level or wrapped in a `"course"`
    /// object. A root with neither `sections` nor `modules` is an
    /// [`Error::Structure`].
    pub fn from_value(document: Value) -> Result<Self> {
        let root = match document.get("course") {
            Some(course) if course.is_object() => course,
            _ => &document,
        };

        let name = text(root, "name");

        let body = if let Some(sections) = root.get("sections").and_then(Value::as_array) {
            CourseBody::Sections(sections.iter().map(parse_section).collect())
        } else if let Some(modules) = root.get("modules").and_then(Value::as_array) {
            CourseBody::Modules(parse_modules(modules))
        } else {
            return Err(Error::Structure(
                "no sections or modules found in course document".into(),
            ));
        };

        Ok(Self {
            name,
            body,
            raw: document,
        })
    }
}

fn parse_section(section: &Value) -> SectionNode {
    SectionNode {
        modules: parse_modules(list(section, "modules", "section")),
    }
}

fn parse_modules(modules: &[Value]) -> Vec<ModuleNode> {
    modules.iter().map(parse_module).collect()
}

fn parse_module(module: &Value) -> ModuleNode {
    let name = text(module, "name").unwrap_or_default();
    if !module.is_object() {
        tracing::warn!("Module entry is not an object: {}", module);
    }

    let owner = format!("module '{}'", name);
    let lessons = list(module, "lessons", &owner).iter().map(parse_lesson).collect();

    ModuleNode {
        name,
        lessons,
        raw: module.clone(),
    }
}

fn parse_lesson(lesson: &Value) -> LessonNode {
    let title = text(lesson, "title").unwrap_or_default();
    if !lesson.is_object() {
        tracing::warn!("Lesson entry is not an object, treating it as empty: {}", lesson);
    }

    LessonNode {
        content: classify(lesson, &title),
        title,
        raw: lesson.clone(),
    }
}

/// Pick the lesson's content in priority order: video, files, inline HTML.
fn classify(lesson: &Value, title: &str) -> LessonContent {
    if let Some(video) = lesson.get("video").and_then(parse_video) {
        return LessonContent::Video(video);
    }

    let owner = format!("lesson '{}'", title);
    let files = list(lesson, "files", &owner);
    if !files.is_empty() {
        let files = files
            .iter()
            .filter_map(|f| match non_empty(f, "url") {
                Some(url) => Some(FileRef {
                    url,
                    name: text(f, "name").unwrap_or_default(),
                }),
                None => {
                    tracing::debug!("Ignoring attachment without URL: {}", f);
                    None
                }
            })
            .collect();
        return LessonContent::FileSet(files);
    }

    match lesson.get("content") {
        Some(Value::String(html)) if !html.is_empty() => LessonContent::Inline(html.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => LessonContent::None,
        Some(other) => {
            tracing::warn!("Ignoring non-text content of lesson '{}': {}", title, other);
            LessonContent::None
        }
    }
}

fn parse_video(video: &Value) -> Option<Video> {
    let source = if let Some(url) = non_empty(video, "download_link") {
        VideoSource::Direct(url)
    } else if let Some(url) = ["playback_url", "playbackURL", "playbackUrl"]
        .iter()
        .find_map(|key| non_empty(video, key))
    {
        VideoSource::Stream(url)
    } else {
        return None;
    };

    Some(Video {
        source,
        name: text(video, "name").unwrap_or_default(),
        thumbnail_url: non_empty(video, "thumbnail"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_sections_shape() {
        let course = CourseNode::from_value(json!({
            "course": {
                "name": "Course",
                "sections": [
                    {"modules": [{"name": "A", "lessons": []}]},
                    {"modules": [{"name": "B", "lessons": []}, {"name": "C"}]}
                ]
            }
        }))
        .unwrap();

        assert_eq!(course.name.as_deref(), Some("Course"));
        let names: Vec<_> = course.modules().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(matches!(course.body, CourseBody::Sections(ref s) if s.len() == 2));
    }

    #[test]
    fn test_parse_bare_modules_shape() {
        let course = CourseNode::from_value(json!({"modules": [{"name": "Only", "lessons": [{"title": "x"}]}]}))
            .unwrap();

        assert!(course.name.is_none());
        assert!(matches!(course.body, CourseBody::Modules(ref m) if m.len() == 1));
    }

    #[test]
    fn test_missing_tree_is_structure_error() {
        let err = CourseNode::from_value(json!({"name": "empty"})).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));

        let err = CourseNode::from_value(json!({"course": {"sections": null}})).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_content_priority_video_first() {
        let course = CourseNode::from_value(json!({
            "modules": [{
                "name": "m",
                "lessons": [{
                    "title": "all of them",
                    "video": {"download_link": "https://cdn/v.mp4", "name": "v.mp4", "thumbnail": "https://cdn/t.png"},
                    "files": [{"url": "https://cdn/a.pdf", "name": "a.pdf"}],
                    "content": "<p>hi</p>"
                }]
            }]
        }))
        .unwrap();

        let lesson = &course.modules().next().unwrap().lessons[0];
        assert_eq!(
            lesson.content,
            LessonContent::Video(Video {
                source: VideoSource::Direct("https://cdn/v.mp4".into()),
                name: "v.mp4".into(),
                thumbnail_url: Some("https://cdn/t.png".into()),
            })
        );
    }

    #[test]
    fn test_content_falls_through_empty_fields() {
        let course = CourseNode::from_value(json!({
            "modules": [{
                "name": "m",
                "lessons": [
                    {"title": "files", "video": null, "files": [{"url": "https://cdn/a.pdf", "name": "a.pdf"}]},
                    {"title": "inline", "files": [], "content": "<p>hi</p>"},
                    {"title": "nothing", "content": ""},
                    {"title": "stream", "video": {"playbackURL": "https://cdn/master.m3u8", "name": "Intro"}}
                ]
            }]
        }))
        .unwrap();

        let kinds: Vec<_> = course
            .modules()
            .flat_map(|m| m.lessons.iter())
            .map(|l| l.content.kind())
            .collect();
        assert_eq!(kinds, ["files", "inline", "none", "video"]);
        assert!(course.has_stream_videos());
    }

    #[test]
    fn test_malformed_lesson_fields_stay_local() {
        let course = CourseNode::from_value(json!({
            "modules": [
                {"name": "m", "lessons": [{"title": "ok", "content": "<p>fine</p>"}]},
                {"name": 2, "lessons": [
                    {"title": 7},
                    {"title": "object content", "content": {"html": "x"}},
                    "not a lesson",
                    {"title": "files", "files": "nope", "video": {"download_link": 5}}
                ]},
                {"name": "broken lessons", "lessons": {"a": 1}}
            ]
        }))
        .unwrap();

        let modules: Vec<_> = course.modules().collect();
        assert_eq!(modules.len(), 3);
        assert_eq!(modules[0].lessons[0].content, LessonContent::Inline("<p>fine</p>".into()));

        assert_eq!(modules[1].name, "2");
        let titles: Vec<_> = modules[1].lessons.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["7", "object content", "", "files"]);
        assert_eq!(modules[1].lessons[0].content, LessonContent::None);
        assert_eq!(modules[1].lessons[1].content, LessonContent::None);
        assert_eq!(modules[1].lessons[2].content, LessonContent::None);
        assert_eq!(
            modules[1].lessons[3].content,
            LessonContent::Video(Video {
                source: VideoSource::Direct("5".into()),
                name: String::new(),
                thumbnail_url: None,
            })
        );

        assert!(modules[2].lessons.is_empty());
    }

    #[test]
    fn test_raw_payload_kept() {
        let lesson = json!({"title": "t", "extra": 42});
        let course = CourseNode::from_value(json!({"modules": [{"name": "m", "lessons": [lesson.clone()]}]}))
            .unwrap();

        let module = course.modules().next().unwrap();
        assert_eq!(module.lessons[0].raw, lesson);
        assert_eq!(module.raw["name"], "m");
    }
}
