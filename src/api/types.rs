//! API response type definitions.

use serde::Deserialize;
use serde_json::Value;

/// JSON:API top-level document.
#[derive(Debug, Deserialize)]
pub struct JsonApiDocument<T> {
    pub data: T,
}

/// `data` of the final-project endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalProject {
    #[serde(default)]
    pub relationships: Option<FinalProjectRelationships>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalProjectRelationships {
    #[serde(default)]
    pub video: Option<Relationship>,
}

/// A JSON:API relationship pointer.
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceIdentifier>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    pub id: Value,
}

impl ResourceIdentifier {
    /// The id as a string, whether the API sent a string or a number.
    pub fn id(&self) -> Option<String> {
        match &self.id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl FinalProject {
    /// Id of the video attached to the final project, if any.
    pub fn video_id(&self) -> Option<String> {
        self.relationships
            .as_ref()?
            .video
            .as_ref()?
            .data
            .as_ref()?
            .id()
    }
}

/// `data` of the video endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoResource {
    pub attributes: VideoAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAttributes {
    #[serde(default)]
    pub playback_url: Option<String>,
}

/// Client state embedded in a unit page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitProps {
    #[serde(default)]
    pub videos: Option<Vec<UnitVideo>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitVideo {
    pub video: UnitVideoInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitVideoInfo {
    #[serde(rename = "playbackURL", default)]
    pub playback_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_final_project_video_id() {
        let doc: JsonApiDocument<FinalProject> = serde_json::from_value(json!({
            "data": {"relationships": {"video": {"data": {"id": 991, "type": "videos"}}}}
        }))
        .unwrap();
        assert_eq!(doc.data.video_id().as_deref(), Some("991"));

        let doc: JsonApiDocument<FinalProject> = serde_json::from_value(json!({
            "data": {"relationships": {"video": {"data": null}}}
        }))
        .unwrap();
        assert_eq!(doc.data.video_id(), None);
    }

    #[test]
    fn test_video_playback_url() {
        let doc: JsonApiDocument<VideoResource> = serde_json::from_value(json!({
            "data": {"id": "991", "attributes": {"playbackUrl": "https://cdn/fp.m3u8"}}
        }))
        .unwrap();
        assert_eq!(doc.data.attributes.playback_url.as_deref(), Some("https://cdn/fp.m3u8"));
    }
}
