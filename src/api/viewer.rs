//! HTTP client for the viewer platform's course-tree endpoint.

use reqwest::{header, Client, StatusCode};
use serde_json::Value;

use crate::error::{Error, Result};

/// Viewer platform API base URL.
const API_BASE: &str = "https://admin-api.kiwify.com.br";

/// Client for the viewer platform.
pub struct ViewerApi {
    client: Client,
    token: String,
    user_agent: String,
    api_base: String,
}

impl ViewerApi {
    /// Create a new client authenticated with a bearer token.
    pub fn new(token: impl Into<String>, user_agent: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.into(),
            user_agent: user_agent.into(),
            api_base: API_BASE.to_string(),
        })
    }

    /// Point requests at a different base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Fetch the full section/module/lesson tree of a course.
    pub async fn get_course_sections(&self, course_id: &str) -> Result<Value> {
        let url = format!("{}/v1/viewer/courses/{}/sections", self.api_base, course_id);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Auth error response: {}", body);
            return Err(Error::Authentication(format!("HTTP {} for course {}", status, course_id)));
        }

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to get course {}: HTTP {}",
                course_id, status
            )));
        }

        let text = response.text().await?;
        tracing::debug!("Course response length: {} bytes", text.len());

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse course: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_course_sections() {
        let server = MockServer::start().await;
        let body = json!({"course": {"name": "C", "modules": []}});
        Mock::given(method("GET"))
            .and(path("/v1/viewer/courses/abc-123/sections"))
            .and(header_eq("authorization", "Bearer secret"))
            .and(header_eq("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let api = ViewerApi::new("secret", "Mozilla/5.0")
            .unwrap()
            .with_api_base(server.uri());
        assert_eq!(api.get_course_sections("abc-123").await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_get_course_sections_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("nope"))
            .mount(&server)
            .await;

        let api = ViewerApi::new("bad", "Mozilla/5.0")
            .unwrap()
            .with_api_base(server.uri());
        let err = api.get_course_sections("1").await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }
}
