use feedline_types::{Post, PostId, Timestamp, UserId};
use serde::Serialize;

/// A successful result that created something (status 201).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Created<T>(pub T);

impl<T> Created<T> {
    pub const STATUS: u16 = 201;

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Status of every other successful operation.
pub const OK: u16 = 200;

/// A post as listed by `my_posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub content: String,
    pub timestamp: Timestamp,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            content: post.content,
            timestamp: post.timestamp,
        }
    }
}

/// A feed entry, attributed by username.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub id: PostId,
    pub author: String,
    pub content: String,
    pub timestamp: Timestamp,
}

/// Public counters for one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub followers: usize,
    pub following: usize,
    pub posts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_serializes_transparently() {
        let json = serde_json::to_value(Created(UserId::new(4))).unwrap();
        assert_eq!(json, serde_json::json!(4));
        assert_eq!(Created::<()>::STATUS, 201);
        assert_eq!(Created("x").into_inner(), "x");
    }

    #[test]
    fn post_view_drops_author() {
        let post = Post {
            id: PostId::new(2),
            author_id: UserId::new(1),
            content: "hi".into(),
            timestamp: Timestamp::from_unix_millis(0).unwrap(),
        };
        let json = serde_json::to_value(PostView::from(post)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 2, "content": "hi", "timestamp": "1970-01-01T00:00:00Z"})
        );
    }
}
