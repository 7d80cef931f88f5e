//! Error types for identity operations.

use feedline_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// A required field was empty.
    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    /// A field was present but malformed or too long.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Another account already uses this email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Another account already uses this username.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account matches the given identifier or username.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The credential hasher failed.
    #[error("credential error: {0}")]
    Crypto(#[from] CryptoError),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for identity operations.
pub type IdentityResult<T> = std::result::Result<T, IdentityError>;
