use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard};

use feedline_types::{feed_order, Post, PostId, Timestamp, UserId};

use crate::error::{PostError, PostResult};
use crate::traits::PostStore;

/// In-memory, append-only post log.
///
/// Posts live in one `Vec` indexed by `id - 1`, with a per-author index of
/// positions. Both sit behind a single `RwLock`, so multi-author reads see
/// one consistent snapshot.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    inner: RwLock<PostLog>,
}

#[derive(Debug, Default)]
struct PostLog {
    posts: Vec<Post>,
    by_author: HashMap<UserId, Vec<usize>>,
}

impl PostLog {
    fn collect_sorted<'a>(&self, positions: impl Iterator<Item = &'a usize>) -> Vec<Post> {
        let mut posts: Vec<Post> = positions.map(|&i| self.posts[i].clone()).collect();
        posts.sort_by(feed_order);
        posts
    }
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> PostResult<RwLockReadGuard<'_, PostLog>> {
        self.inner
            .read()
            .map_err(|e| PostError::Storage(format!("lock poisoned: {e}")))
    }
}

impl PostStore for InMemoryPostStore {
    fn append(&self, author_id: UserId, content: String, timestamp: Timestamp) -> PostResult<Post> {
        let mut log = self
            .inner
            .write()
            .map_err(|e| PostError::Storage(format!("lock poisoned: {e}")))?;

        let position = log.posts.len();
        let post = Post {
            id: PostId::new(position as u64 + 1),
            author_id,
            content,
            timestamp,
        };
        log.posts.push(post.clone());
        log.by_author.entry(author_id).or_default().push(position);
        Ok(post)
    }

    fn post(&self, id: PostId) -> PostResult<Option<Post>> {
        let log = self.read()?;
        let Some(position) = (id.get() as usize).checked_sub(1) else {
            return Ok(None);
        };
        Ok(log.posts.get(position).cloned())
    }

    fn posts_by_author(&self, author_id: UserId) -> PostResult<Vec<Post>> {
        let log = self.read()?;
        Ok(match log.by_author.get(&author_id) {
            Some(positions) => log.collect_sorted(positions.iter()),
            None => Vec::new(),
        })
    }

    fn posts_by_authors(&self, authors: &BTreeSet<UserId>) -> PostResult<Vec<Post>> {
        let log = self.read()?;
        let positions = authors
            .iter()
            .filter_map(|author| log.by_author.get(author))
            .flatten();
        Ok(log.collect_sorted(positions))
    }

    fn count(&self) -> PostResult<usize> {
        Ok(self.read()?.posts.len())
    }

    fn count_by_author(&self, author_id: UserId) -> PostResult<usize> {
        Ok(self.read()?.by_author.get(&author_id).map_or(0, Vec::len))
    }
}
