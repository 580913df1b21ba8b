//! Access denied error type.
//!
//! [`AccessDenied`] is what a caller gets when it asks for a `Result`
//! instead of a boolean. The two variants map to the two ways a guarded
//! operation can fail:
//!
//! ```text
//! no actor in session ──► Unauthenticated  (go log in, then retry)
//! actor lacks grant   ──► Denied           (show reason, stay out)
//! ```
//!
//! A malformed grant never shows up here as its own error. It has
//! already been absorbed into `Denied` by the resolver.

use thiserror::Error;
use warden_types::{Action, ErrorCode};

/// Access to a protected operation was refused.
///
/// # Example
///
/// ```
/// use warden_auth::AccessDenied;
/// use warden_types::{Action, ErrorCode};
///
/// let err = AccessDenied::Denied {
///     path: "/payments".to_string(),
///     action: Action::Refund,
///     reason: "not granted".to_string(),
/// };
///
/// assert!(err.to_string().contains("refund"));
/// assert_eq!(err.code(), "AUTH_PERMISSION_DENIED");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No actor is logged in.
    #[error("authentication required to access '{requested}'")]
    Unauthenticated {
        /// The path that was requested, kept for retry after login.
        requested: String,
    },

    /// The actor is logged in but not permitted.
    #[error("'{action}' on '{path}' denied: {reason}")]
    Denied {
        /// The protected path.
        path: String,
        /// The action attempted.
        action: Action,
        /// Human-readable explanation.
        reason: String,
    },
}

impl AccessDenied {
    /// Returns the path the refused operation targeted.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Unauthenticated { requested } => requested,
            Self::Denied { path, .. } => path,
        }
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "AUTH_UNAUTHENTICATED",
            Self::Denied { .. } => "AUTH_PERMISSION_DENIED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Logging in can fix the first; retrying never fixes the second.
        matches!(self, Self::Unauthenticated { .. })
    }
}
