use std::collections::BTreeSet;
use std::sync::Arc;

use feedline_graph::FollowGraph;
use feedline_posts::PostStore;
use feedline_types::{feed_order, Post, UserId};

use crate::error::FeedResult;

/// Builds feeds by fanning out across the follow graph and the post store.
///
/// Read-only. The following set is read under the graph's lock, then all
/// candidate posts are read from the post store in one snapshot, so a
/// concurrent append is either fully visible or not at all.
pub struct FeedAssembler {
    graph: Arc<dyn FollowGraph>,
    posts: Arc<dyn PostStore>,
}

impl FeedAssembler {
    pub fn new(graph: Arc<dyn FollowGraph>, posts: Arc<dyn PostStore>) -> Self {
        Self { graph, posts }
    }

    /// The authors whose posts appear in `user`'s feed: everyone they follow,
    /// plus themselves.
    pub fn audience_of(&self, user: UserId) -> FeedResult<BTreeSet<UserId>> {
        let mut authors = self.graph.following_of(user)?;
        authors.insert(user);
        Ok(authors)
    }

    /// `user`'s feed in feed order, without duplicates.
    pub fn feed_for(&self, user: UserId) -> FeedResult<Vec<Post>> {
        let authors = self.audience_of(user)?;
        let mut feed = self.posts.posts_by_authors(&authors)?;

        // Backends may not honor feed order or may repeat a post.
        feed.sort_by(feed_order);
        feed.dedup_by_key(|post| post.id);

        tracing::debug!(user = %user, authors = authors.len(), posts = feed.len(), "assembled feed");
        Ok(feed)
    }
}
