//! Community feed endpoints.

#[cfg(test)]
#[path = "communities_test.rs"]
mod communities_test;

use crate::client::{ApiClient, RequestConfig};
use crate::error::ApiError;
use crate::teams::report_parts;
use crate::transport::Upload;
use crate::types::{CommunityData, CommunityPost, CreateCommunityRequest, LikeResult};

impl ApiClient {
    /// `GET /api/v1/communities`.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, status, or decode error.
    pub async fn community_list(&self) -> Result<Vec<CommunityPost>, ApiError> {
        self.request(RequestConfig::get("/api/v1/communities").authorized()).await?.into_data()
    }

    /// `POST /api/v1/communities` (multipart).
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, or status error.
    pub async fn create_community_post(
        &self,
        request: &CreateCommunityRequest,
        photos: Vec<Upload>,
    ) -> Result<(), ApiError> {
        let parts = report_parts(request, photos)?;
        self.request(RequestConfig::post("/api/v1/communities").authorized().multipart(parts))
            .await?
            .into_unit()
    }

    /// `GET /api/v1/communities/{id}`.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, status, or decode error.
    pub async fn community_detail(&self, post_id: i64) -> Result<CommunityData, ApiError> {
        let path = format!("/api/v1/communities/{post_id}");
        self.request(RequestConfig::get(path).authorized()).await?.into_data()
    }

    /// `POST /api/v1/communities/{id}/like`. The server toggles the like.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, status, or decode error.
    pub async fn like_community_post(&self, post_id: i64) -> Result<LikeResult, ApiError> {
        let path = format!("/api/v1/communities/{post_id}/like");
        self.request(RequestConfig::post(path).authorized()).await?.into_data()
    }

    /// `POST /api/v1/communities/{id}/comment`.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, or status error.
    pub async fn comment_on_community_post(&self, post_id: i64, content: &str) -> Result<(), ApiError> {
        let path = format!("/api/v1/communities/{post_id}/comment");
        let body = serde_json::json!({ "content": content });
        self.request(RequestConfig::post(path).authorized().json(body)).await?.into_unit()
    }
}
