//! HTTP client wrapper with session-aware response interception.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint call funnels through [`ApiClient::request`]. It resolves
//! the URL against the configured base, attaches the bearer token for
//! authorized calls, and applies [`session::intercept`] to the outcome.
//! Session side effects (clear, then reload) run before the error is
//! returned, so no caller can observe a stale token after a 401.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use serde_json::Value;
use session::{Interception, Outcome, Session, SessionAction, Verdict, intercept};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::transport::{HttpRequest, HttpResponse, Method, Part, RequestBody, ReqwestTransport, Transport};

/// Hard reset hook fired after the session has been wiped.
///
/// The browser client reloaded the page here; other front ends drop any
/// in-memory user state and route back to login.
pub trait Reload: Send + Sync {
    fn reload(&self);
}

/// [`Reload`] that does nothing beyond the session wipe itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReload;

impl Reload for NoReload {
    fn reload(&self) {}
}

/// Request descriptor for [`ApiClient::request`].
#[derive(Clone, Debug, PartialEq)]
pub struct RequestConfig {
    pub method: Method,
    pub path: String,
    pub authorized: bool,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Statuses returned raw instead of intercepted.
    pub suppress_status: Vec<u16>,
}

impl RequestConfig {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            authorized: false,
            query: Vec::new(),
            body: RequestBody::Empty,
            suppress_status: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Attach `Authorization: Bearer <accessToken>` from the session.
    #[must_use]
    pub fn authorized(mut self) -> Self {
        self.authorized = true;
        self
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_owned(), value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<Part>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    #[must_use]
    pub fn suppress(mut self, statuses: &[u16]) -> Self {
        self.suppress_status.extend_from_slice(statuses);
        self
    }
}

/// GreenMate API client.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Session,
    reload: Arc<dyn Reload>,
}

impl ApiClient {
    /// Build a client backed by [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(&config.base_url, Arc::new(transport), session))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            transport,
            session,
            reload: Arc::new(NoReload),
        }
    }

    #[must_use]
    pub fn with_reload(mut self, reload: Arc<dyn Reload>) -> Self {
        self.reload = reload;
        self
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and apply the interception policy.
    ///
    /// Returns the raw response for every status the policy passes,
    /// including 5xx.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`], [`ApiError::Forbidden`] or
    /// [`ApiError::Unauthorized`] for intercepted statuses,
    /// [`ApiError::Network`] when no response arrived, and store errors if
    /// the token cannot be read.
    pub async fn request(&self, config: RequestConfig) -> Result<HttpResponse, ApiError> {
        let request = self.resolve(&config)?;
        let method = request.method.as_str();
        let result = self.transport.send(request).await;

        let outcome = match &result {
            Ok(response) => Some(Outcome::Status(response.status)),
            Err(ApiError::Network(_)) => Some(Outcome::NetworkFailure),
            Err(_) => None,
        };
        // Request-building errors never reached the server.
        let Some(outcome) = outcome else {
            return result;
        };
        if let Outcome::Status(status) = outcome {
            tracing::debug!(method, path = %config.path, status, "api response");
        }

        let Interception { action, verdict } = intercept(outcome, &config.suppress_status);
        self.apply(action, &config.path);

        match verdict {
            Verdict::Pass | Verdict::Propagate => result,
            Verdict::Reject(kind) => Err(kind.into()),
        }
    }

    fn resolve(&self, config: &RequestConfig) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        if config.authorized {
            if let Some(token) = self.session.access_token()? {
                headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
            }
        }

        Ok(HttpRequest {
            method: config.method,
            url: format!("{}{}", self.base_url, config.path),
            headers,
            query: config.query.clone(),
            body: config.body.clone(),
        })
    }

    fn apply(&self, action: SessionAction, path: &str) {
        match action {
            SessionAction::None => {}
            SessionAction::ClearSession => self.clear_session(path),
            SessionAction::ClearSessionAndReload => {
                self.clear_session(path);
                self.reload.reload();
            }
        }
    }

    fn clear_session(&self, path: &str) {
        tracing::warn!(path, "session invalidated by api response");
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "failed to clear session store");
        }
    }
}
