use std::fmt;

use feedline_feed::FeedError;
use feedline_graph::GraphError;
use feedline_identity::IdentityError;
use feedline_posts::PostError;
use serde::Serialize;
use thiserror::Error;

/// Error taxonomy for the operation surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing, malformed, or oversized input.
    Validation,
    /// Unknown user or relationship.
    NotFound,
    /// Duplicate account or existing relationship.
    Conflict,
    /// Unauthenticated caller or bad credentials.
    Auth,
    /// Store failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Auth => "auth",
            Self::Internal => "internal",
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("{0}")]
    InvalidContent(String),

    #[error("you cannot follow yourself")]
    CannotFollowSelf,

    #[error("email {0} already exists")]
    DuplicateEmail(String),

    #[error("username {0} already exists")]
    DuplicateUsername(String),

    #[error("you're already following {0}")]
    AlreadyFollowing(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("you're not following {0}")]
    NotFollowing(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("you must be logged in to access this resource")]
    Unauthenticated,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::InvalidField { .. }
            | Self::InvalidContent(_)
            | Self::CannotFollowSelf => ErrorKind::Validation,
            Self::DuplicateEmail(_) | Self::DuplicateUsername(_) | Self::AlreadyFollowing(_) => {
                ErrorKind::Conflict
            }
            Self::UserNotFound(_) | Self::NotFollowing(_) => ErrorKind::NotFound,
            Self::InvalidCredentials | Self::Unauthenticated => ErrorKind::Auth,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidField { .. } => "invalid_field",
            Self::InvalidContent(_) => "invalid_content",
            Self::CannotFollowSelf => "cannot_follow_self",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::DuplicateUsername(_) => "duplicate_username",
            Self::AlreadyFollowing(_) => "already_following",
            Self::UserNotFound(_) => "user_not_found",
            Self::NotFollowing(_) => "not_following",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthenticated => "unauthenticated",
            Self::Internal(_) => "internal",
        }
    }

    /// HTTP-style status for the outer layer.
    ///
    /// Conflicts map to 400, not 409: duplicate email and already-following
    /// are reported as bad requests.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidCredentials => 401,
            Self::Unauthenticated => 403,
            Self::Internal(_) => 500,
            other => match other.kind() {
                ErrorKind::NotFound => 404,
                _ => 400,
            },
        }
    }

    /// Structured body: `{"code": ..., "kind": ..., "message": ...}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "kind": self.kind(),
            "message": self.to_string(),
        })
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MissingField { field } => Self::MissingField(field.to_string()),
            IdentityError::InvalidField { field, reason } => Self::InvalidField {
                field: field.to_string(),
                reason,
            },
            IdentityError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            IdentityError::DuplicateUsername(name) => Self::DuplicateUsername(name),
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            IdentityError::UserNotFound(who) => Self::UserNotFound(who),
            IdentityError::Crypto(e) => Self::Internal(e.to_string()),
            IdentityError::Storage(e) => Self::Internal(e),
        }
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::SelfFollow(_) => Self::CannotFollowSelf,
            GraphError::Storage(e) => Self::Internal(e),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::InvalidContent { .. } => Self::InvalidContent(err.to_string()),
            PostError::Storage(e) => Self::Internal(e),
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Graph(e) => e.into(),
            FeedError::Posts(e) => e.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use feedline_types::UserId;

    #[test]
    fn codes_kinds_and_statuses() {
        let cases: Vec<(ApiError, &str, ErrorKind, u16)> = vec![
            (ApiError::MissingField("email".into()), "missing_field", ErrorKind::Validation, 400),
            (ApiError::InvalidContent("x".into()), "invalid_content", ErrorKind::Validation, 400),
            (ApiError::CannotFollowSelf, "cannot_follow_self", ErrorKind::Validation, 400),
            (ApiError::DuplicateEmail("a@x.com".into()), "duplicate_email", ErrorKind::Conflict, 400),
            (ApiError::AlreadyFollowing("bob".into()), "already_following", ErrorKind::Conflict, 400),
            (ApiError::UserNotFound("bob".into()), "user_not_found", ErrorKind::NotFound, 404),
            (ApiError::NotFollowing("bob".into()), "not_following", ErrorKind::NotFound, 404),
            (ApiError::InvalidCredentials, "invalid_credentials", ErrorKind::Auth, 401),
            (ApiError::Unauthenticated, "unauthenticated", ErrorKind::Auth, 403),
            (ApiError::Internal("boom".into()), "internal", ErrorKind::Internal, 500),
        ];
        for (err, code, kind, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.kind(), kind, "{code}");
            assert_eq!(err.status(), status, "{code}");
        }
    }

    #[test]
    fn json_body() {
        let body = ApiError::AlreadyFollowing("bob".into()).to_json();
        assert_eq!(body["code"], "already_following");
        assert_eq!(body["kind"], "conflict");
        assert_eq!(body["message"], "you're already following bob");
    }

    #[test]
    fn conversions_from_component_errors() {
        let err: ApiError = IdentityError::MissingField { field: "username" }.into();
        assert!(matches!(err, ApiError::MissingField(f) if f == "username"));

        let err: ApiError = GraphError::SelfFollow(UserId::new(1)).into();
        assert_eq!(err.code(), "cannot_follow_self");

        let err: ApiError = FeedError::Posts(PostError::Storage("poisoned".into())).into();
        assert_eq!(err.status(), 500);

        let err: ApiError = PostError::InvalidContent { length: 0, max: 280 }.into();
        assert_eq!(err.to_string(), "post content must be between 1 and 280 characters, got 0");
    }
}
