//! API client configuration parsed from environment variables.

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeouts: ApiTimeouts,
}

impl ApiConfig {
    /// Config for an explicit base URL with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the URL is not a parseable `http://` or
    /// `https://` URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: ApiTimeouts::default() })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `GREENMATE_API_BASE_URL`: full base URL, wins over host/port
    /// - `GREENMATE_API_HOST` / `GREENMATE_API_PORT`: joined as `{host}:{port}`
    /// - `GREENMATE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GREENMATE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the resulting base URL is invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let base_url = match (get("GREENMATE_API_BASE_URL"), get("GREENMATE_API_HOST")) {
            (Some(url), _) => url,
            (None, Some(host)) => match get("GREENMATE_API_PORT") {
                Some(port) => format!("{}:{port}", host.trim_end_matches('/')),
                None => host,
            },
            (None, None) => DEFAULT_BASE_URL.to_owned(),
        };

        // Zero would make every request time out immediately.
        let parse_secs = |key: &str, default: u64| {
            get(key).and_then(|v| v.parse::<u64>().ok()).filter(|secs| *secs > 0).unwrap_or(default)
        };
        let timeouts = ApiTimeouts {
            request_secs: parse_secs("GREENMATE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_secs("GREENMATE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url: normalize_base_url(&base_url)?, timeouts })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ApiError::Config(format!("base URL must start with http:// or https://: {raw}")));
    }
    reqwest::Url::parse(trimmed).map_err(|e| ApiError::Config(format!("invalid base URL {raw}: {e}")))?;
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
