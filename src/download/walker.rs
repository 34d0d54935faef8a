//! Course tree traversal.
//!
//! The walk is synchronous and deterministic. It creates directories, writes
//! metadata and inline lesson bodies, and returns the network work as a list
//! of [`DownloadTask`]s without running any of it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::course::{CourseBody, CourseNode, LessonContent, LessonNode, ModuleNode, VideoSource};
use crate::download::task::DownloadTask;
use crate::error::Result;
use crate::fs::naming::{file_name_or, segment};
use crate::fs::paths::{
    ensure_dir, get_course_folder, write_metadata, COURSE_METADATA, INLINE_CONTENT_FILE,
    LESSON_METADATA, MODULE_METADATA, THUMBNAIL_FILE,
};

/// Traversal state owned by a single walk.
///
/// The module index runs across the whole course; the lesson index restarts
/// for every module. Every file path is claimed at most once, so no two tasks
/// ever write the same file.
#[derive(Debug, Default)]
struct WalkState {
    next_module: usize,
    tasks: Vec<DownloadTask>,
    inline_written: usize,
    claimed: HashSet<PathBuf>,
}

impl WalkState {
    /// Reserve `path`, renaming to `<stem>_<n>.<ext>` when it is already taken.
    fn claim(&mut self, path: PathBuf) -> PathBuf {
        if self.claimed.insert(path.clone()) {
            return path;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path.extension().map(|e| e.to_string_lossy().into_owned());

        let mut n = 1;
        loop {
            let name = match &ext {
                Some(ext) => format!("{}_{}.{}", stem, n, ext),
                None => format!("{}_{}", stem, n),
            };
            let candidate = path.with_file_name(name);
            if self.claimed.insert(candidate.clone()) {
                tracing::warn!(
                    "Duplicate destination {}, saving as {}",
                    path.display(),
                    candidate.display()
                );
                return candidate;
            }
            n += 1;
        }
    }

    fn push_file(&mut self, label: String, url: &str, dest: PathBuf) {
        let dest = self.claim(dest);
        self.tasks.push(DownloadTask::file(label, url, dest));
    }
}

/// Result of walking a course tree.
#[derive(Debug, Default)]
pub struct WalkResult {
    /// Folder the course was mirrored into.
    pub course_dir: PathBuf,

    /// Network downloads still to perform.
    pub tasks: Vec<DownloadTask>,

    /// Number of modules visited.
    pub modules: usize,

    /// Number of inline lesson bodies written during the walk.
    pub inline_written: usize,
}

/// Walk `course` under `base_dir`, returning every download task.
pub fn walk(course: &CourseNode, base_dir: &Path) -> Result<WalkResult> {
    let course_dir = get_course_folder(base_dir, course.name.as_deref().unwrap_or_default());
    ensure_dir(&course_dir)?;

    let mut state = WalkState::default();
    let metadata = write_metadata(&course_dir, COURSE_METADATA, &course.raw)?;
    state.claimed.insert(metadata);

    match &course.body {
        CourseBody::Sections(sections) => {
            for section in sections {
                walk_modules(&section.modules, &course_dir, &mut state)?;
            }
        }
        CourseBody::Modules(modules) => walk_modules(modules, &course_dir, &mut state)?,
    }

    tracing::info!(
        "Walked {} module(s) into {}: {} download task(s)",
        state.next_module,
        course_dir.display(),
        state.tasks.len()
    );

    Ok(WalkResult {
        course_dir,
        tasks: state.tasks,
        modules: state.next_module,
        inline_written: state.inline_written,
    })
}

fn walk_modules(modules: &[ModuleNode], course_dir: &Path, state: &mut WalkState) -> Result<()> {
    for module in modules {
        let index = state.next_module;
        state.next_module += 1;
        walk_module(index, module, course_dir, state)?;
    }
    Ok(())
}

fn walk_module(index: usize, module: &ModuleNode, course_dir: &Path, state: &mut WalkState) -> Result<()> {
    let module_segment = segment(index, &module.name);
    let module_dir = course_dir.join(&module_segment);

    ensure_dir(&module_dir)?;
    let metadata = write_metadata(&module_dir, MODULE_METADATA, &module.raw)?;
    state.claimed.insert(metadata);
    tracing::info!("Module '{}'", module_segment);

    let flat = module.is_flat();

    for (lesson_index, lesson) in module.lessons.iter().enumerate() {
        let lesson_segment = segment(lesson_index, &lesson.title);

        let lesson_dir = if flat {
            module_dir.clone()
        } else {
            let dir = module_dir.join(&lesson_segment);
            ensure_dir(&dir)?;
            let metadata = write_metadata(&dir, LESSON_METADATA, &lesson.raw)?;
            state.claimed.insert(metadata);
            dir
        };

        let label = format!("{}/{}", module_segment, lesson_segment);
        tracing::debug!("Lesson '{}' ({})", label, lesson.content.kind());
        emit_lesson(lesson, &lesson_segment, &lesson_dir, &label, state)?;
    }

    Ok(())
}

fn emit_lesson(
    lesson: &LessonNode,
    lesson_segment: &str,
    lesson_dir: &Path,
    label: &str,
    state: &mut WalkState,
) -> Result<()> {
    match &lesson.content {
        LessonContent::Video(video) => {
            tracing::debug!("Queueing video for '{}'", label);
            match &video.source {
                VideoSource::Direct(url) => {
                    let name = file_name_or(&video.name, || format!("{}.mp4", lesson_segment));
                    state.push_file(label.to_string(), url, lesson_dir.join(name));
                }
                VideoSource::Stream(manifest_url) => state.tasks.push(DownloadTask::stream(
                    label,
                    manifest_url,
                    lesson_dir.to_path_buf(),
                    lesson_segment,
                )),
            }

            if let Some(thumbnail) = &video.thumbnail_url {
                state.push_file(
                    format!("{} (thumbnail)", label),
                    thumbnail,
                    lesson_dir.join(THUMBNAIL_FILE),
                );
            }
        }
        LessonContent::FileSet(files) => {
            tracing::debug!("Queueing {} file(s) for '{}'", files.len(), label);
            for (i, file) in files.iter().enumerate() {
                let name = file_name_or(&file.name, || format!("file_{}", i));
                state.push_file(format!("{}/{}", label, name), &file.url, lesson_dir.join(name));
            }
        }
        LessonContent::Inline(html) => {
            let path = state.claim(lesson_dir.join(INLINE_CONTENT_FILE));
            std::fs::write(path, html)?;
            state.inline_written += 1;
        }
        LessonContent::None => {
            tracing::debug!("No downloadable content for '{}'", label);
        }
    }

    Ok(())
}
