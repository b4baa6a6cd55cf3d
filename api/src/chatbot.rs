//! Chatbot endpoint.

#[cfg(test)]
#[path = "chatbot_test.rs"]
mod chatbot_test;

use crate::client::{ApiClient, RequestConfig};
use crate::error::ApiError;
use crate::types::{ChatBotChat, ChatRequest};

impl ApiClient {
    /// `POST /api/v1/chatbots` with the conversation so far.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, status, or decode error.
    pub async fn chat(&self, conversation: &[ChatRequest]) -> Result<ChatBotChat, ApiError> {
        let body = serde_json::to_value(conversation).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.request(RequestConfig::post("/api/v1/chatbots").authorized().json(body)).await?.into_data()
    }
}
