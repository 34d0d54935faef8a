//! Course tree representation.

use serde_json::Value;

/// Root of a course tree.
#[derive(Debug, Clone)]
pub struct CourseNode {
    /// Course display name, if the payload carries one.
    pub name: Option<String>,

    /// Either a list of sections or a flat list of modules.
    pub body: CourseBody,

    /// The complete source document, persisted as `course.json`.
    pub raw: Value,
}

/// The two tree shapes a course can take.
#[derive(Debug, Clone)]
pub enum CourseBody {
    Sections(Vec<SectionNode>),
    Modules(Vec<ModuleNode>),
}

/// Grouping layer above modules. Has no content of its own.
#[derive(Debug, Clone)]
pub struct SectionNode {
    pub modules: Vec<ModuleNode>,
}

/// A module: a named, ordered list of lessons.
#[derive(Debug, Clone)]
pub struct ModuleNode {
    pub name: String,
    pub lessons: Vec<LessonNode>,
    pub raw: Value,
}

impl ModuleNode {
    /// A module with exactly one lesson stores it directly in the module folder.
    pub fn is_flat(&self) -> bool {
        self.lessons.len() == 1
    }
}

/// A single lesson.
#[derive(Debug, Clone)]
pub struct LessonNode {
    pub title: String,
    pub content: LessonContent,
    pub raw: Value,
}

/// What a lesson carries, decided once at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonContent {
    Video(Video),
    FileSet(Vec<FileRef>),
    Inline(String),
    None,
}

impl LessonContent {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LessonContent::Video(_) => "video",
            LessonContent::FileSet(_) => "files",
            LessonContent::Inline(_) => "inline",
            LessonContent::None => "none",
        }
    }
}

/// A lesson video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub source: VideoSource,

    /// File name to save a direct download as.
    pub name: String,

    pub thumbnail_url: Option<String>,
}

/// Where a video's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// A plain file URL, fetched over HTTP.
    Direct(String),
    /// An adaptive-stream manifest, handed to the stream downloader.
    Stream(String),
}

/// A lesson attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub url: String,
    pub name: String,
}

impl CourseNode {
    /// Iterate modules in traversal order, across sections.
    pub fn modules(&self) -> Box<dyn Iterator<Item = &ModuleNode> + '_> {
        match &self.body {
            CourseBody::Sections(sections) => {
                Box::new(sections.iter().flat_map(|s| s.modules.iter()))
            }
            CourseBody::Modules(modules) => Box::new(modules.iter()),
        }
    }

    /// Whether any lesson needs the external stream downloader.
    pub fn has_stream_videos(&self) -> bool {
        self.modules().flat_map(|m| m.lessons.iter()).any(|l| {
            matches!(
                &l.content,
                LessonContent::Video(Video {
                    source: VideoSource::Stream(_),
                    ..
                })
            )
        })
    }
}
