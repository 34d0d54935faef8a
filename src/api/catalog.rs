//! HTTP client for the page platform (rendered course pages + JSON:API).

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::auth::PageCredentials;
use crate::api::types::{FinalProject, JsonApiDocument, VideoResource};
use crate::error::{Error, Result};

/// Page platform REST API base URL.
const API_BASE: &str = "https://api.domestika.org/api";

/// Media type of the JSON:API endpoints.
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Header selecting the endpoint version.
const ACCEPT_VERSION_HEADER: &str = "x-dmstk-accept-version";

/// Client for the page platform.
pub struct CatalogApi {
    client: Client,
    credentials: PageCredentials,
    api_base: String,
}

impl CatalogApi {
    /// Create a new client.
    pub fn new(credentials: PageCredentials, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            api_base: API_BASE.to_string(),
        })
    }

    /// Point REST calls at a different base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Fetch a rendered page with the session cookie.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::COOKIE, self.credentials.cookie_header())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(format!(
                    "HTTP {} fetching page {}. Check if the session cookie is valid.",
                    status, url
                )),
                _ => Error::Api(format!("HTTP {} fetching page {}", status, url)),
            });
        }

        Ok(response.text().await?)
    }

    /// Make an authenticated JSON:API GET request.
    async fn get_json_api<T: DeserializeOwned>(&self, path: &str, version: &str) -> Result<T> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("GET {} ({})", url, version);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.credentials.access_token)
            .header(header::ACCEPT, JSON_API_MEDIA_TYPE)
            .header(header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)
            .header(ACCEPT_VERSION_HEADER, version)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Error response: {}", body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(format!(
                    "HTTP {} from {}. Check if credentials are valid.",
                    status, path
                )),
                _ => Error::Api(format!("HTTP {} from {}", status, path)),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse {}: {} - Response: {}",
                path,
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Look up the playback URL of a course's final-project video.
    ///
    /// `Ok(None)` means the course has no final-project video; API failures are
    /// returned as errors.
    pub async fn get_final_project_video(&self, course_id: &str) -> Result<Option<String>> {
        let path = format!("/courses/{}/final-project?with_server_timing=true", course_id);
        let project: JsonApiDocument<FinalProject> =
            self.get_json_api(&path, "finalProject.v1").await?;

        let Some(video_id) = project.data.video_id() else {
            return Ok(None);
        };

        let path = format!("/videos/{}?with_server_timing=true", video_id);
        let video: JsonApiDocument<VideoResource> = self.get_json_api(&path, "video.v1").await?;

        Ok(video.data.attributes.playback_url.filter(|u| !u.is_empty()))
    }
}
