//! HTTP transport seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`crate::ApiClient`] talks to a [`Transport`] rather than `reqwest`
//! directly so the interception policy can be exercised against scripted
//! responses. [`ReqwestTransport`] is the production implementation.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;

const DEFAULT_ERROR_MESSAGE: &str = "an error occurred";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A file attached to a multipart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Read a file from disk, guessing its content type from the extension.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
        Ok(Self { content_type: guess_content_type(&file_name).to_owned(), file_name, bytes })
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// One field of a multipart form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, upload: Upload },
}

impl Part {
    /// Text part holding `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `value` cannot be serialized.
    pub fn json<T: Serialize>(name: &str, value: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_string(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Self::Text { name: name.to_owned(), value })
    }

    #[must_use]
    pub fn file(name: &str, upload: Upload) -> Self {
        Self::File { name: name.to_owned(), upload }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<Part>),
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// First header value with a case-insensitive name match.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status plus undecoded body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// The `errorMessage` field the API puts in rejection bodies.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let value = serde_json::from_slice::<Value>(&self.body).ok()?;
        value
            .get("errorMessage")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(ToOwned::to_owned)
    }

    /// Convert a non-success response into the error a caller should surface.
    #[must_use]
    pub fn into_error(self) -> ApiError {
        if self.status >= 500 {
            return ApiError::Server { status: self.status };
        }
        let message = self.error_message().unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned());
        ApiError::Rejected { status: self.status, message }
    }

    /// Decode a 2xx body, or turn any other status into an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] for 5xx, [`ApiError::Rejected`] for other
    /// non-2xx statuses, and [`ApiError::Decode`] for a body mismatch.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.into_error());
        }
        self.json()
    }

    /// Like [`HttpResponse::into_data`] but ignores the body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or [`ApiError::Rejected`] for non-2xx.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.is_success() { Ok(()) } else { Err(self.into_error()) }
    }
}

/// Sends a resolved request and returns whatever status came back.
///
/// Implementations report "no response" as [`ApiError::Network`] and a
/// request that could not be built as [`ApiError::InvalidRequest`]; every
/// status code, including 4xx/5xx, is an `Ok` response.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// =============================================================================
// REQWEST
// =============================================================================

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder.json(&json),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder.send().await.map_err(send_error)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// Builder errors (bad URL, bad header value) never left the process and
/// must not be mistaken for a missing response.
fn send_error(e: reqwest::Error) -> ApiError {
    if e.is_builder() {
        ApiError::InvalidRequest(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

fn multipart_form(parts: Vec<Part>) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File { name, upload } => {
                let file = reqwest::multipart::Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(&upload.content_type)
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}
