//! Page platform: course tree assembled from rendered pages.
//!
//! The course page lists units; each unit page embeds its videos in a
//! `window.__INITIAL_PROPS__` client-state blob. A final-project video, when
//! present, comes from the REST API and is appended as its own module.

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{json, Value};
use url::Url;

use crate::api::types::UnitProps;
use crate::api::CatalogApi;
use crate::error::{Error, Result};
use crate::provider::CourseTreeProvider;

const UNIT_LINK_SELECTOR: &str = "h4.h2.unit-item__title a";
const COURSE_TITLE_SELECTOR: &str = "h1.course-header-new__title";
const SECTION_TITLE_SELECTOR: &str = "h2.h3.course-header-new__subtitle";
const INITIAL_PROPS_MARKER: &str = "window.__INITIAL_PROPS__";

/// Title used for the final-project module and lesson.
pub const FINAL_PROJECT_TITLE: &str = "Final project";

/// A unit link on the course page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitLink {
    pub title: String,
    pub href: String,
}

/// What the course page tells us.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePage {
    pub title: String,
    pub units: Vec<UnitLink>,
    pub final_project_id: Option<String>,
}

/// A video listed on a unit page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitVideoRef {
    pub title: String,
    pub playback_url: String,
}

/// What a unit page tells us.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitPage {
    pub section: String,
    pub videos: Vec<UnitVideoRef>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Api(format!("Invalid selector '{}': {:?}", css, e)))
}

/// Strip dots and surrounding whitespace from a unit or video title.
fn clean_title(title: &str) -> String {
    title.replace('.', "").trim().to_string()
}

/// Course id of a final-project link (`.../courses/<id>-<slug>/final_project`).
pub fn final_project_id(href: &str) -> Option<String> {
    let pattern = Regex::new(r"courses/(.*?)-*/final_project").ok()?;
    let slug = pattern.captures(href)?.get(1)?.as_str();
    slug.split('-')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Parse the course page: title, unit links and the final-project id.
pub fn parse_course_page(html: &str) -> Result<CoursePage> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector(COURSE_TITLE_SELECTOR)?)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let mut page = CoursePage {
        title,
        ..Default::default()
    };

    for element in document.select(&selector(UNIT_LINK_SELECTOR)?) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(id) = final_project_id(href) {
            page.final_project_id.get_or_insert(id);
            continue;
        }

        page.units.push(UnitLink {
            title: clean_title(&element.text().collect::<String>()),
            href: href.to_string(),
        });
    }

    Ok(page)
}

/// Decode the body of a JS string literal. Returns `None` on a malformed escape.
fn unescape_js_string(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '0' => out.push('\0'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                if hex.len() != 2 {
                    return None;
                }
                out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                let unit = u32::from_str_radix(&hex, 16).ok()?;
                if (0xD800..0xDC00).contains(&unit) {
                    // surrogate pair: expect a following \uXXXX
                    if chars.next()? != '\\' || chars.next()? != 'u' {
                        return None;
                    }
                    let low: String = chars.by_ref().take(4).collect();
                    if low.len() != 4 {
                        return None;
                    }
                    let low = u32::from_str_radix(&low, 16).ok()?;
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low.checked_sub(0xDC00)?);
                    out.push(char::from_u32(code)?);
                } else {
                    out.push(char::from_u32(unit)?);
                }
            }
            '\n' => {}
            other => out.push(other),
        }
    }

    Some(out)
}

/// Turn the right-hand side of the state assignment into JSON text.
///
/// Handles a bare JSON literal and `JSON.parse('...')` / `JSON.parse("...")`.
fn state_json(rhs: &str) -> Option<String> {
    let Some(call) = rhs.strip_prefix("JSON.parse(") else {
        return Some(rhs.to_string());
    };

    let call = call.trim_start();
    let quote = call.chars().next().filter(|q| matches!(*q, '\'' | '"' | '`'))?;
    let body = &call[quote.len_utf8()..];

    let mut escaped = false;
    let end = body.char_indices().find_map(|(i, c)| {
        if escaped {
            escaped = false;
            None
        } else if c == '\\' {
            escaped = true;
            None
        } else if c == quote {
            Some(i)
        } else {
            None
        }
    })?;

    unescape_js_string(&body[..end])
}

/// Find the `window.__INITIAL_PROPS__ = {...}` blob in the page scripts.
fn extract_initial_props(document: &Html) -> Result<Option<Value>> {
    for script in document.select(&selector("script")?) {
        let text = script.text().collect::<String>();
        let Some(start) = text.find(INITIAL_PROPS_MARKER) else {
            continue;
        };

        let rest = &text[start + INITIAL_PROPS_MARKER.len()..];
        let Some(rest) = rest.trim_start().strip_prefix('=') else {
            continue;
        };

        let Some(json_text) = state_json(rest.trim_start()) else {
            tracing::warn!("Unreadable JSON.parse argument in client state");
            continue;
        };

        // the assignment may be followed by `;` or more script
        let mut values = serde_json::Deserializer::from_str(json_text.trim_start()).into_iter::<Value>();
        match values.next() {
            Some(Ok(value)) => return Ok(Some(value)),
            Some(Err(e)) => tracing::warn!("Unparseable client state: {}", e),
            None => {}
        }
    }

    Ok(None)
}

/// Parse a unit page: section heading and listed videos.
pub fn parse_unit_page(html: &str) -> Result<UnitPage> {
    let document = Html::parse_document(html);

    let section = document
        .select(&selector(SECTION_TITLE_SELECTOR)?)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let props: UnitProps = match extract_initial_props(&document)? {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("Client state of unit '{}' has an unexpected shape: {}", section, e);
            UnitProps::default()
        }),
        None => {
            tracing::warn!("No client state found on unit page '{}'", section);
            UnitProps::default()
        }
    };

    let videos = props
        .videos
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| {
            let playback_url = entry.video.playback_url.filter(|u| !u.is_empty())?;
            let title = clean_title(&entry.video.title.unwrap_or_default());
            tracing::debug!("Video found: {}", title);
            Some(UnitVideoRef {
                title,
                playback_url,
            })
        })
        .collect();

    Ok(UnitPage { section, videos })
}

fn stream_lesson(title: &str, playback_url: &str) -> Value {
    json!({
        "title": title,
        "video": {"playback_url": playback_url, "name": title}
    })
}

/// Scrapes a course from its rendered pages.
pub struct PageProvider {
    api: CatalogApi,
    course_url: String,
}

impl PageProvider {
    pub fn new(api: CatalogApi, course_url: impl Into<String>) -> Self {
        Self {
            api,
            course_url: course_url.into(),
        }
    }

    async fn fetch_unit(&self, unit_url: &str) -> Result<UnitPage> {
        let html = self.api.get_page(unit_url).await?;
        parse_unit_page(&html)
    }

    async fn final_project_module(&self, course_id: &str) -> Option<Value> {
        tracing::info!("Fetching final project...");
        match self.api.get_final_project_video(course_id).await {
            Ok(Some(playback_url)) => Some(json!({
                "name": FINAL_PROJECT_TITLE,
                "section": FINAL_PROJECT_TITLE,
                "lessons": [stream_lesson(FINAL_PROJECT_TITLE, &playback_url)]
            })),
            Ok(None) => {
                tracing::info!("Course has no final-project video");
                None
            }
            Err(e) => {
                tracing::warn!("Final project lookup failed for course {}: {}", course_id, e);
                None
            }
        }
    }
}

#[async_trait]
impl CourseTreeProvider for PageProvider {
    async fn fetch_document(&self) -> Result<Value> {
        let base = Url::parse(&self.course_url)?;

        let html = self.api.get_page(&self.course_url).await?;
        let page = parse_course_page(&html)?;
        tracing::info!("{} unit(s) detected in '{}'", page.units.len(), page.title);

        let mut modules = Vec::with_capacity(page.units.len() + 1);
        for unit in &page.units {
            let unit_url = base.join(&unit.href)?;

            // keep the module even when the unit fails so later indices stay stable
            let unit_page = match self.fetch_unit(unit_url.as_str()).await {
                Ok(unit_page) => unit_page,
                Err(e) => {
                    tracing::warn!("Failed to read unit '{}' ({}): {}", unit.title, unit_url, e);
                    UnitPage::default()
                }
            };

            let lessons: Vec<Value> = unit_page
                .videos
                .iter()
                .map(|v| stream_lesson(&v.title, &v.playback_url))
                .collect();

            modules.push(json!({
                "name": unit.title,
                "section": unit_page.section,
                "url": unit_url.as_str(),
                "lessons": lessons
            }));
        }

        if let Some(course_id) = &page.final_project_id {
            if let Some(module) = self.final_project_module(course_id).await {
                modules.push(module);
            }
        }

        Ok(json!({
            "course": {
                "name": page.title,
                "url": self.course_url,
                "modules": modules
            }
        }))
    }

    fn name(&self) -> &'static str {
        "page"
    }
}
