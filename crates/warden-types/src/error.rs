//! Unified error interface for warden.
//!
//! This module provides the [`ErrorCode`] trait for standardized
//! error handling across all warden crates, and [`TypesError`] for
//! the construction failures of this crate.
//!
//! # Example
//!
//! ```
//! use warden_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     NotFound(String),
//!     Timeout,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound(_) => "NOT_FOUND",
//!             Self::Timeout => "TIMEOUT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! let err = LookupError::Timeout;
//! assert_eq!(err.code(), "TIMEOUT");
//! assert!(err.is_recoverable());
//! ```

use thiserror::Error;

/// Unified error code interface for warden errors.
///
/// # Code Format
///
/// Error codes should be:
///
/// - **UPPER_SNAKE_CASE**: e.g., `"PERMISSION_DENIED"`
/// - **Namespace-prefixed**: e.g., `"AUTH_UNAUTHENTICATED"`, `"GRANT_UNKNOWN_ACTION"`
/// - **Stable**: codes are part of the API contract
///
/// # Recoverability
///
/// An error is recoverable if the user can act to fix it (log in again,
/// fix a config file). Permission denials and malformed data are not
/// recoverable by retrying.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying or a user action may resolve the error.
    fn is_recoverable(&self) -> bool;
}

/// Errors raised when building the core value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// A resource path was empty.
    #[error("resource path must not be empty")]
    EmptyPath,

    /// An action token is outside the known vocabulary.
    #[error("unknown action token: '{0}'")]
    UnknownAction(String),
}

impl ErrorCode for TypesError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyPath => "TYPES_EMPTY_PATH",
            Self::UnknownAction(_) => "TYPES_UNKNOWN_ACTION",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_prefixed() {
        assert_eq!(TypesError::EmptyPath.code(), "TYPES_EMPTY_PATH");
        assert_eq!(
            TypesError::UnknownAction("fly".into()).code(),
            "TYPES_UNKNOWN_ACTION"
        );
    }

    #[test]
    fn display_names_token() {
        let err = TypesError::UnknownAction("fly".into());
        assert!(err.to_string().contains("'fly'"), "got: {err}");
        assert!(!err.is_recoverable());
    }
}
