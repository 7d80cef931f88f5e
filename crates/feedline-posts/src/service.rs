use std::sync::Arc;

use feedline_types::{content_length, Clock, Post, UserId, DEFAULT_MAX_POST_CHARS};

use crate::error::{PostError, PostResult};
use crate::traits::PostStore;

/// Validates and stamps new posts before handing them to a [`PostStore`].
///
/// Does not check that the author exists; that is the caller's job, since
/// accounts live in the identity store.
pub struct PostService {
    store: Arc<dyn PostStore>,
    clock: Arc<dyn Clock>,
    max_chars: usize,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_limit(store, clock, DEFAULT_MAX_POST_CHARS)
    }

    pub fn with_limit(store: Arc<dyn PostStore>, clock: Arc<dyn Clock>, max_chars: usize) -> Self {
        Self {
            store,
            clock,
            max_chars,
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Check content length against the limit without storing anything.
    pub fn validate(&self, content: &str) -> PostResult<()> {
        let length = content_length(content);
        if length == 0 || length > self.max_chars {
            return Err(PostError::InvalidContent {
                length,
                max: self.max_chars,
            });
        }
        Ok(())
    }

    /// Validate `content` and append it with the current time.
    ///
    /// Content is stored verbatim.
    pub fn create(&self, author_id: UserId, content: &str) -> PostResult<Post> {
        self.validate(content)?;
        let post = self
            .store
            .append(author_id, content.to_string(), self.clock.now())?;
        tracing::info!(post = %post.id, author = %author_id, "post created");
        Ok(post)
    }

    /// Every post by `author_id`, newest first.
    pub fn posts_by_author(&self, author_id: UserId) -> PostResult<Vec<Post>> {
        self.store.posts_by_author(author_id)
    }

    pub fn store(&self) -> &Arc<dyn PostStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryPostStore;
    use chrono::Duration;
    use feedline_types::ManualClock;

    fn service() -> (PostService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_at_epoch_2024());
        let service = PostService::new(Arc::new(InMemoryPostStore::new()), clock.clone());
        (service, clock)
    }

    #[test]
    fn length_boundaries() {
        let (posts, _) = service();
        let author = UserId::new(1);

        assert!(matches!(
            posts.create(author, "").unwrap_err(),
            PostError::InvalidContent { length: 0, max: 280 }
        ));
        assert!(matches!(
            posts.create(author, &"x".repeat(281)).unwrap_err(),
            PostError::InvalidContent { length: 281, max: 280 }
        ));
        assert!(posts.create(author, "x").is_ok());
        assert!(posts.create(author, &"x".repeat(280)).is_ok());
        assert_eq!(posts.store().count().unwrap(), 2);
    }

    #[test]
    fn multibyte_content_counts_characters() {
        let (posts, _) = service();
        assert!(posts.create(UserId::new(1), &"é".repeat(280)).is_ok());
        assert!(posts.create(UserId::new(1), &"é".repeat(281)).is_err());
    }

    #[test]
    fn whitespace_only_content_is_stored_verbatim() {
        let (posts, _) = service();
        let post = posts.create(UserId::new(1), "  ").unwrap();
        assert_eq!(post.content, "  ");
    }

    #[test]
    fn timestamps_come_from_the_clock() {
        let (posts, clock) = service();
        let first = posts.create(UserId::new(1), "first").unwrap();
        let later = clock.advance(Duration::seconds(30));
        let second = posts.create(UserId::new(1), "second").unwrap();

        assert_eq!(second.timestamp, later);
        assert!(second.timestamp > first.timestamp);
        let listed = posts.posts_by_author(UserId::new(1)).unwrap();
        assert_eq!(listed[0].id, second.id);
    }

    #[test]
    fn custom_limit() {
        let posts = PostService::with_limit(
            Arc::new(InMemoryPostStore::new()),
            Arc::new(ManualClock::starting_at_epoch_2024()),
            5,
        );
        assert_eq!(posts.max_chars(), 5);
        assert!(posts.validate("12345").is_ok());
        assert!(posts.validate("123456").is_err());
    }
}
