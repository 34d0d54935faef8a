//! Course module for tree representation and parsing.

pub mod model;
pub mod parser;

pub use model::{
    CourseBody, CourseNode, FileRef, LessonContent, LessonNode, ModuleNode, SectionNode, Video,
    VideoSource,
};
