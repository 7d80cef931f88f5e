use feedline_types::UserId;
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A user tried to follow themselves.
    #[error("{0} cannot follow themselves")]
    SelfFollow(UserId),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;
