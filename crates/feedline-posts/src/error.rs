/// Errors from post store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostError {
    /// Content is empty or longer than the configured limit.
    #[error("post content must be between 1 and {max} characters, got {length}")]
    InvalidContent { length: usize, max: usize },

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result alias for post operations.
pub type PostResult<T> = Result<T, PostError>;
