use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Directed relationship: `follower` receives `followed`'s posts in their feed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower: UserId,
    pub followed: UserId,
}

impl FollowEdge {
    pub fn new(follower: UserId, followed: UserId) -> Self {
        Self { follower, followed }
    }

    pub fn is_self_loop(&self) -> bool {
        self.follower == self.followed
    }
}

impl fmt::Debug for FollowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FollowEdge({self})")
    }
}

impl fmt::Display for FollowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.follower, self.followed)
    }
}
