//! Wire types for the GreenMate REST API.
//!
//! Field names follow the server's camelCase JSON.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// USERS
// =============================================================================

/// Author summary embedded in posts and comments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSimple {
    #[serde(deserialize_with = "session::claims::deserialize_id")]
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub nickname: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicknameCheck {
    pub is_duplicate: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub content: String,
    pub created_at: String,
    pub user: UserSimple,
}

// =============================================================================
// TEAM RECRUITMENT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaType {
    Circle,
    Polygon,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

/// Activity area: a circle (center + radius in meters) or a polygon.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "type")]
    pub kind: Option<AreaType>,
    pub center: Option<Point>,
    pub radius: Option<f64>,
    pub points: Option<Vec<Point>>,
}

impl Area {
    #[must_use]
    pub fn circle(center: Point, radius: f64) -> Self {
        Self { kind: Some(AreaType::Circle), center: Some(center), radius: Some(radius), points: None }
    }

    #[must_use]
    pub fn polygon(points: Vec<Point>) -> Self {
        Self { kind: Some(AreaType::Polygon), center: None, radius: None, points: Some(points) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecruitmentSimple {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub join_count: u32,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecruitmentRequest {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub area: Option<Area>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentData {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub user: UserSimple,
    #[serde(default)]
    pub comments: Vec<CommentDto>,
    pub join_count: u32,
    #[serde(default)]
    pub is_joined: bool,
    #[serde(default)]
    pub area: Option<Area>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResult {
    pub join_count: u32,
    pub is_join: bool,
}

// =============================================================================
// COMMUNITY
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: i64,
    pub created_at: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub like_count: u32,
    pub comment_count: u32,
    pub user: UserSimple,
    #[serde(default)]
    pub is_liked: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityData {
    pub id: i64,
    pub title: String,
    pub created_at: String,
    pub user: UserSimple,
    pub description: String,
    pub like_count: u32,
    pub comment_count: u32,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub comments: Vec<CommentDto>,
    #[serde(default)]
    pub is_liked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommunityRequest {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResult {
    pub like_count: u32,
    pub is_like: bool,
}

// =============================================================================
// LEARNING / CHATBOT
// =============================================================================

/// Recycling instruction card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Learning {
    pub title: String,
    #[serde(default)]
    pub icon_image: Option<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBotChat {
    pub content: String,
}
