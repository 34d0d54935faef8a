//! Viewer platform: the whole tree from one REST call.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::ViewerApi;
use crate::error::Result;
use crate::provider::CourseTreeProvider;

/// Fetches a course tree from the viewer platform's sections endpoint.
pub struct ViewerProvider {
    api: ViewerApi,
    course_id: String,
}

impl ViewerProvider {
    pub fn new(api: ViewerApi, course_id: impl Into<String>) -> Self {
        Self {
            api,
            course_id: course_id.into(),
        }
    }
}

#[async_trait]
impl CourseTreeProvider for ViewerProvider {
    async fn fetch_document(&self) -> Result<Value> {
        tracing::info!("Fetching course {}...", self.course_id);
        self.api.get_course_sections(&self.course_id).await
    }

    fn name(&self) -> &'static str {
        "viewer"
    }
}
