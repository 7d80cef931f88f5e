use feedline_graph::GraphError;
use feedline_posts::PostError;
use thiserror::Error;

/// Errors produced while assembling a feed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("post store error: {0}")]
    Posts(#[from] PostError),
}

pub type FeedResult<T> = Result<T, FeedError>;
