//! Recycling learning catalog.

#[cfg(test)]
#[path = "learnings_test.rs"]
mod learnings_test;

use crate::client::{ApiClient, RequestConfig};
use crate::error::ApiError;
use crate::types::Learning;

impl ApiClient {
    /// `GET /api/v1/learnings`.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, status, or decode error.
    pub async fn learning_list(&self) -> Result<Vec<Learning>, ApiError> {
        self.request(RequestConfig::get("/api/v1/learnings").authorized()).await?.into_data()
    }
}
