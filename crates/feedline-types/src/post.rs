use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::ids::{PostId, UserId};
use crate::temporal::Timestamp;

/// Longest post accepted by default, in characters.
pub const DEFAULT_MAX_POST_CHARS: usize = 280;

/// An append-only post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub content: String,
    pub timestamp: Timestamp,
}

/// Length of post content as counted against the character limit.
///
/// Counts Unicode scalar values, so `"né"` is 2 characters regardless of
/// its UTF-8 byte length.
pub fn content_length(content: &str) -> usize {
    content.chars().count()
}

/// The feed order: newest timestamp first, then highest post id first.
///
/// This is a total order over posts with distinct ids, so sorting with it
/// is deterministic even when timestamps collide.
pub fn feed_order(a: &Post, b: &Post) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, ms: i64) -> Post {
        Post {
            id: PostId::new(id),
            author_id: UserId::new(1),
            content: format!("post {id}"),
            timestamp: Timestamp::from_unix_millis(ms).unwrap(),
        }
    }

    #[test]
    fn newer_timestamp_sorts_first() {
        assert_eq!(feed_order(&post(1, 2_000), &post(2, 1_000)), Ordering::Less);
        assert_eq!(feed_order(&post(2, 1_000), &post(1, 2_000)), Ordering::Greater);
    }

    #[test]
    fn equal_timestamps_fall_back_to_id_desc() {
        let mut posts = vec![post(1, 500), post(3, 500), post(2, 500)];
        posts.sort_by(feed_order);
        let ids: Vec<u64> = posts.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn content_length_counts_chars_not_bytes() {
        assert_eq!(content_length(""), 0);
        assert_eq!(content_length("né"), 2);
        assert_eq!(content_length("🦀🦀"), 2);
    }
}
