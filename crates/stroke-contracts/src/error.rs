//! Error types for the stroke risk service.
//!
//! Every fallible operation in the workspace returns `StrokeResult<T>`. The
//! three user-facing variants are recoverable and are translated into alerts
//! or redirects by the request layer; none of them terminates the process.

use thiserror::Error;

/// The unified error type for the stroke risk service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrokeError {
    /// Registration was attempted for a username that already exists.
    #[error("username '{username}' is already registered")]
    DuplicateUser { username: String },

    /// The username is unknown or the credential does not match.
    ///
    /// Deliberately does not say which of the two was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token is empty, unknown, revoked, or idle past the timeout.
    #[error("no active session")]
    NoSession,

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The shared store could not be accessed (poisoned lock).
    #[error("session store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// The operating system's secure random source failed.
    #[error("secure random source unavailable: {reason}")]
    EntropyUnavailable { reason: String },
}

/// Convenience alias used throughout the stroke crates.
pub type StrokeResult<T> = Result<T, StrokeError>;
