use std::collections::BTreeSet;

use feedline_types::{Post, PostId, Timestamp, UserId};

use crate::error::PostResult;

/// Append-only post storage.
///
/// All implementations must satisfy these invariants:
/// - Posts are immutable once appended.
/// - Post ids increase with insertion order.
/// - Every query returns a materialized sequence in feed order (newest
///   timestamp first, then highest id first). Queries are restartable:
///   calling again re-reads the store.
/// - `posts_by_authors` reads all requested authors from one consistent
///   snapshot, so it never observes half of a concurrent append.
pub trait PostStore: Send + Sync {
    /// Append a post. Content is assumed to be validated by the caller.
    fn append(&self, author_id: UserId, content: String, timestamp: Timestamp) -> PostResult<Post>;

    /// Fetch a post by id. Returns `Ok(None)` if it does not exist.
    fn post(&self, id: PostId) -> PostResult<Option<Post>>;

    /// Every post by `author_id`, in feed order.
    fn posts_by_author(&self, author_id: UserId) -> PostResult<Vec<Post>>;

    /// Every post by any member of `authors`, in feed order.
    fn posts_by_authors(&self, authors: &BTreeSet<UserId>) -> PostResult<Vec<Post>>;

    /// Total number of posts.
    fn count(&self) -> PostResult<usize>;

    /// Number of posts by `author_id`.
    fn count_by_author(&self, author_id: UserId) -> PostResult<usize> {
        Ok(self.posts_by_author(author_id)?.len())
    }
}
