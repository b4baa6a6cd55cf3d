//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends use this to decide whether to show the login / sign-up flow or
//! the main tabs, and to render identity-dependent content (comment author,
//! profile card) from the decoded token instead of a server round trip.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::claims::SessionClaims;
use crate::store::{Session, SessionReadError};

/// Top-level screen a front end should present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Login,
    SignUp,
    Main,
}

/// Authentication state tracking the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SessionClaims>,
}

impl AuthState {
    /// Load the state from whatever token the session holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored token is
    /// malformed.
    pub fn load(session: &Session) -> Result<Self, SessionReadError> {
        Ok(Self { user: session.claims()? })
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Logged-out users land on login, or sign-up when they asked for it.
    #[must_use]
    pub fn view(&self, signing_up: bool) -> View {
        match (&self.user, signing_up) {
            (Some(_), _) => View::Main,
            (None, true) => View::SignUp,
            (None, false) => View::Login,
        }
    }
}
