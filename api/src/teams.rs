//! Team recruitment endpoints.

#[cfg(test)]
#[path = "teams_test.rs"]
mod teams_test;

use crate::client::{ApiClient, RequestConfig};
use crate::error::ApiError;
use crate::transport::{Part, Upload};
use crate::types::{CreateRecruitmentRequest, JoinResult, RecruitmentData, TeamRecruitmentSimple};

/// Multipart layout shared by recruitment and community post creation:
/// one JSON `request` part followed by a `reportPhotos` part per image.
pub(crate) fn report_parts<T: serde::Serialize>(request: &T, photos: Vec<Upload>) -> Result<Vec<Part>, ApiError> {
    let mut parts = Vec::with_capacity(photos.len() + 1);
    parts.push(Part::json("request", request)?);
    parts.extend(photos.into_iter().map(|photo| Part::file("reportPhotos", photo)));
    Ok(parts)
}

impl ApiClient {
    /// `GET /api/v1/teams`.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, status, or decode error.
    pub async fn team_list(&self) -> Result<Vec<TeamRecruitmentSimple>, ApiError> {
        self.request(RequestConfig::get("/api/v1/teams").authorized()).await?.into_data()
    }

    /// `POST /api/v1/teams` (multipart).
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, or status error.
    pub async fn create_team_recruitment(
        &self,
        request: &CreateRecruitmentRequest,
        photos: Vec<Upload>,
    ) -> Result<(), ApiError> {
        let parts = report_parts(request, photos)?;
        self.request(RequestConfig::post("/api/v1/teams").authorized().multipart(parts)).await?.into_unit()
    }

    /// `GET /api/v1/teams/{id}`.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, status, or decode error.
    pub async fn team_detail(&self, team_id: i64) -> Result<RecruitmentData, ApiError> {
        let path = format!("/api/v1/teams/{team_id}");
        self.request(RequestConfig::get(path).authorized()).await?.into_data()
    }

    /// `POST /api/v1/teams/{id}/join`. The server toggles membership.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, status, or decode error.
    pub async fn join_team(&self, team_id: i64) -> Result<JoinResult, ApiError> {
        let path = format!("/api/v1/teams/{team_id}/join");
        self.request(RequestConfig::post(path).authorized()).await?.into_data()
    }

    /// `POST /api/v1/teams/{id}/comment`.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, or status error.
    pub async fn comment_on_team(&self, team_id: i64, content: &str) -> Result<(), ApiError> {
        let path = format!("/api/v1/teams/{team_id}/comment");
        let body = serde_json::json!({ "content": content });
        self.request(RequestConfig::post(path).authorized().json(body)).await?.into_unit()
    }
}
