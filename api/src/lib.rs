//! GreenMate REST API client.
//!
//! DESIGN
//! ======
//! Every endpoint goes through [`ApiClient::request`], which owns the
//! cross-cutting contract: base URL, bearer header, and the status
//! interception policy from [`session::policy`]. Endpoint modules only build
//! request descriptors and decode bodies.
//!
//! ERROR HANDLING
//! ==============
//! 401/403 and network failures wipe the session and fire [`Reload`] before
//! the error is returned. 5xx is not an interception case; the endpoint
//! layer turns it into [`ApiError::Server`] so callers can show a transient
//! notice.

pub mod chatbot;
pub mod client;
pub mod communities;
pub mod config;
pub mod error;
pub mod learnings;
pub mod teams;
pub mod transport;
pub mod types;
pub mod users;

pub use client::{ApiClient, NoReload, Reload, RequestConfig};
pub use config::{ApiConfig, ApiTimeouts};
pub use error::ApiError;
pub use transport::{HttpRequest, HttpResponse, Method, Part, RequestBody, ReqwestTransport, Transport, Upload};
