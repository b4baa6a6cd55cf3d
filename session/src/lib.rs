//! Client-side session core for the GreenMate API client.
//!
//! This crate owns everything about the signed-in user that does not need a
//! network: decoding the bearer token payload, persisting tokens, deciding
//! what an HTTP status means for the session, and which view a caller
//! should land on. It performs no I/O beyond the optional file-backed store.

pub mod claims;
pub mod policy;
pub mod state;
pub mod store;

pub use claims::{SessionClaims, TokenError, decode_claims};
pub use policy::{ApiErrorKind, Interception, Outcome, SessionAction, Verdict, intercept};
pub use state::{AuthState, View};
pub use store::{
    ACCESS_TOKEN_KEY, FileStore, MemoryStore, REFRESH_TOKEN_KEY, Session, SessionReadError, StoreError,
    TokenStore,
};
