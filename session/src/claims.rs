//! Session token payload decoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API issues a compact three-part bearer token. Its middle segment is
//! base64url JSON carrying the signed-in user's identity, which the client
//! reads to render "who am I" without another round trip. The signature is
//! never checked here; the server remains the only authority.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer, Serialize};

/// Error returned by [`decode_claims`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token does not have exactly three dot-separated segments.
    #[error("malformed session token: expected 3 segments, found {segments}")]
    Malformed { segments: usize },
    /// One of the three segments is empty (zero-based `index`).
    #[error("malformed session token: segment {index} is empty")]
    EmptySegment { index: usize },
    /// The payload segment is not valid base64.
    #[error("session token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded payload is not the expected JSON object.
    #[error("session token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Identity fields embedded in the session token payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub email: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// Decode the identity payload of a session token.
///
/// Accepts both the base64url and standard alphabets, padded or not.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] when the token is not three segments,
/// [`TokenError::EmptySegment`] when one of them is empty, and [`TokenError::Base64`] / [`TokenError::Json`] for a bad payload.
pub fn decode_claims(token: &str) -> Result<SessionClaims, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed { segments: segments.len() });
    }
    if let Some(index) = segments.iter().position(|segment| segment.is_empty()) {
        return Err(TokenError::EmptySegment { index });
    }

    let payload = normalize_segment(segments[1]);
    let bytes = URL_SAFE_NO_PAD.decode(payload.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn normalize_segment(segment: &str) -> String {
    segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Deserialize an identifier sent either as a JSON string or an integer.
///
/// # Errors
///
/// Fails for any other JSON type.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
