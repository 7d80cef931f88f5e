//! The [`FollowGraph`] trait defining the follow-edge storage interface.

use std::collections::BTreeSet;

use feedline_types::UserId;

use crate::error::GraphResult;

/// Storage backend for directed follow edges.
///
/// Implementations must be thread-safe (`Send + Sync`). `follow` and
/// `unfollow` are check-then-act operations and must run as one atomic step,
/// so concurrent identical requests can neither duplicate nor lose an edge.
/// Returned sets are materialized snapshots, ascending by id.
pub trait FollowGraph: Send + Sync {
    /// Whether `follower` follows `followed`.
    fn is_following(&self, follower: UserId, followed: UserId) -> GraphResult<bool>;

    /// Insert the edge `follower -> followed`.
    ///
    /// Returns `Ok(true)` if the edge was inserted and `Ok(false)` if it
    /// already existed (no-op). Fails with `SelfFollow` when both ids match.
    fn follow(&self, follower: UserId, followed: UserId) -> GraphResult<bool>;

    /// Remove the edge `follower -> followed`.
    ///
    /// Returns `Ok(true)` if an edge was removed and `Ok(false)` if there was
    /// none (no-op).
    fn unfollow(&self, follower: UserId, followed: UserId) -> GraphResult<bool>;

    /// Every user that follows `user`.
    fn followers_of(&self, user: UserId) -> GraphResult<BTreeSet<UserId>>;

    /// Every user that `user` follows.
    fn following_of(&self, user: UserId) -> GraphResult<BTreeSet<UserId>>;

    /// Total number of edges.
    fn edge_count(&self) -> GraphResult<usize>;

    fn follower_count(&self, user: UserId) -> GraphResult<usize> {
        Ok(self.followers_of(user)?.len())
    }

    fn following_count(&self, user: UserId) -> GraphResult<usize> {
        Ok(self.following_of(user)?.len())
    }
}
