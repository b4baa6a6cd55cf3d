//! Error taxonomy for API calls.

use session::{ApiErrorKind, SessionReadError, StoreError, TokenError};

/// Errors produced by [`crate::ApiClient`] and the endpoint helpers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 404 from any call.
    #[error("Not Found")]
    NotFound,

    /// 403 from any call; the session has already been cleared.
    #[error("Forbidden")]
    Forbidden,

    /// 401 from any call; the session has already been cleared.
    #[error("Unauthorized")]
    Unauthorized,

    /// The server answered with a 5xx status.
    #[error("Internal Server Error (status {status})")]
    Server { status: u16 },

    /// A non-success status below 500 that the caller did not expect,
    /// carrying the server's `errorMessage` when one was sent.
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// No response arrived; the session has already been cleared.
    #[error("network request failed: {0}")]
    Network(String),

    /// The response body could not be deserialized.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request could not be built (bad header value, bad MIME type).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A configuration value was invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("session store failed: {0}")]
    Store(#[from] StoreError),

    #[error("session token invalid: {0}")]
    Token(#[from] TokenError),
}

impl From<ApiErrorKind> for ApiError {
    fn from(kind: ApiErrorKind) -> Self {
        match kind {
            ApiErrorKind::NotFound => Self::NotFound,
            ApiErrorKind::Forbidden => Self::Forbidden,
            ApiErrorKind::Unauthorized => Self::Unauthorized,
            ApiErrorKind::Server => Self::Server { status: 500 },
        }
    }
}

impl From<SessionReadError> for ApiError {
    fn from(err: SessionReadError) -> Self {
        match err {
            SessionReadError::Store(e) => Self::Store(e),
            SessionReadError::Token(e) => Self::Token(e),
        }
    }
}

impl ApiError {
    /// The status-derived kind, if this error came from a status code.
    #[must_use]
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::NotFound => Some(ApiErrorKind::NotFound),
            Self::Forbidden => Some(ApiErrorKind::Forbidden),
            Self::Unauthorized => Some(ApiErrorKind::Unauthorized),
            Self::Server { .. } => Some(ApiErrorKind::Server),
            _ => None,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server { status } | Self::Rejected { status, .. } => Some(*status),
            other => other.kind().map(ApiErrorKind::status_code),
        }
    }

    /// True when handling this error already logged the user out.
    #[must_use]
    pub fn ended_session(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden | Self::Network(_))
    }
}
