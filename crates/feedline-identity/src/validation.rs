//! Registration field rules.
//!
//! - Username: non-empty after trimming, no whitespace, at most
//!   `max_username_chars` characters.
//! - Email: non-empty after trimming, exactly one `@` with non-empty local
//!   and domain parts, no whitespace, at most `max_email_chars` characters.
//!   Compared case-insensitively.
//! - Password: non-empty, taken verbatim (whitespace counts). No strength
//!   policy.

use serde::{Deserialize, Serialize};

use crate::error::{IdentityError, IdentityResult};

/// Length limits applied at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityLimits {
    pub max_username_chars: usize,
    pub max_email_chars: usize,
}

impl Default for IdentityLimits {
    fn default() -> Self {
        Self {
            max_username_chars: 80,
            max_email_chars: 120,
        }
    }
}

/// Trim and lowercase an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Fail with `MissingField` if `value` is empty or whitespace-only.
pub fn require(field: &'static str, value: &str) -> IdentityResult<()> {
    if value.trim().is_empty() {
        return Err(IdentityError::MissingField { field });
    }
    Ok(())
}

/// Fail with `MissingField` only if `secret` is empty. Secrets are hashed
/// verbatim, so whitespace is content.
pub fn require_secret(field: &'static str, secret: &str) -> IdentityResult<()> {
    if secret.is_empty() {
        return Err(IdentityError::MissingField { field });
    }
    Ok(())
}

/// Validate a trimmed username.
///
/// ```
/// use feedline_identity::validation::validate_username;
/// use feedline_identity::IdentityLimits;
///
/// let limits = IdentityLimits::default();
/// assert!(validate_username("alice", &limits).is_ok());
/// assert!(validate_username("al ice", &limits).is_err());
/// assert!(validate_username("", &limits).is_err());
/// ```
pub fn validate_username(username: &str, limits: &IdentityLimits) -> IdentityResult<()> {
    require("username", username)?;

    if username.chars().any(char::is_whitespace) {
        return Err(invalid("username", "must not contain whitespace"));
    }

    let len = username.chars().count();
    if len > limits.max_username_chars {
        return Err(invalid(
            "username",
            format!("{len} characters exceeds limit of {}", limits.max_username_chars),
        ));
    }

    Ok(())
}

/// Validate a normalized email.
pub fn validate_email(email: &str, limits: &IdentityLimits) -> IdentityResult<()> {
    require("email", email)?;

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("email", "must not contain whitespace"));
    }

    let len = email.chars().count();
    if len > limits.max_email_chars {
        return Err(invalid(
            "email",
            format!("{len} characters exceeds limit of {}", limits.max_email_chars),
        ));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(invalid("email", "must have the form local@domain")),
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> IdentityError {
    IdentityError::InvalidField {
        field,
        reason: reason.into(),
    }
}
