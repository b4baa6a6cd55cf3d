//! Response interception policy.
//!
//! DESIGN
//! ======
//! Status handling is a pure function from the transport outcome to a pair:
//! what to do to the session, and what the caller sees. The HTTP layer runs
//! the session action first and only then hands the verdict back, so every
//! caller observes the logged-out state by the time it sees the error.
//!
//! | outcome            | session action           | verdict              |
//! |--------------------|--------------------------|----------------------|
//! | suppressed status  | none                     | pass                 |
//! | 401                | clear + reload           | reject Unauthorized  |
//! | 403                | clear + reload           | reject Forbidden     |
//! | 404                | none                     | reject `NotFound`    |
//! | other status       | none                     | pass (incl. 5xx)     |
//! | network failure    | clear + reload           | propagate            |

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use serde::{Deserialize, Serialize};

/// Error kinds the client recognizes from HTTP status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// Generic server failure (default / 500).
    Server,
    /// 404.
    NotFound,
    /// 403.
    Forbidden,
    /// 401.
    Unauthorized,
}

impl ApiErrorKind {
    #[must_use]
    pub fn status_code(self) -> u16 {
        match self {
            Self::Server => 500,
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::Unauthorized => 401,
        }
    }

    /// Stable error name reported to callers and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Server => "ServerError",
            Self::NotFound => "NotFoundError",
            Self::Forbidden => "ForbiddenError",
            Self::Unauthorized => "AuthError",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Server => "Internal Server Error",
            Self::NotFound => "Not Found",
            Self::Forbidden => "Forbidden",
            Self::Unauthorized => "Unauthorized",
        }
    }

    /// Map an intercepted status to its kind, `None` when the status passes.
    #[must_use]
    pub fn from_intercepted_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// What the transport produced for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A response arrived with this status code.
    Status(u16),
    /// No response: connection refused, DNS, timeout, TLS.
    NetworkFailure,
}

/// Side effect to apply to the stored session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionAction {
    None,
    ClearSession,
    ClearSessionAndReload,
}

/// What the caller receives after interception.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Hand the raw response back.
    Pass,
    /// Fail with a typed error.
    Reject(ApiErrorKind),
    /// Re-raise the transport error unchanged.
    Propagate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interception {
    pub action: SessionAction,
    pub verdict: Verdict,
}

impl Interception {
    const PASS: Self = Self { action: SessionAction::None, verdict: Verdict::Pass };
}

/// Decide the session action and caller verdict for a transport outcome.
///
/// Statuses listed in `suppressed` are returned to the caller untouched.
#[must_use]
pub fn intercept(outcome: Outcome, suppressed: &[u16]) -> Interception {
    let status = match outcome {
        Outcome::NetworkFailure => {
            return Interception {
                action: SessionAction::ClearSessionAndReload,
                verdict: Verdict::Propagate,
            };
        }
        Outcome::Status(status) => status,
    };

    if suppressed.contains(&status) {
        return Interception::PASS;
    }

    match ApiErrorKind::from_intercepted_status(status) {
        Some(kind @ (ApiErrorKind::Unauthorized | ApiErrorKind::Forbidden)) => Interception {
            action: SessionAction::ClearSessionAndReload,
            verdict: Verdict::Reject(kind),
        },
        Some(kind) => Interception { action: SessionAction::None, verdict: Verdict::Reject(kind) },
        None => Interception::PASS,
    }
}
