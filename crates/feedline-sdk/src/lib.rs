//! High-level API for Feedline.
//!
//! [`Feedline`] is the operation surface an outer layer (HTTP, CLI, tests)
//! calls into: register, authenticate, follow, unfollow, list followers and
//! following, create posts, list own posts, read the feed. Every acting
//! operation takes an explicit [`AuthContext`]; every failure is an
//! [`ApiError`] carrying a stable code and an HTTP-style status.

pub mod auth;
pub mod config;
pub mod error;
pub mod feedline;
pub mod views;

pub use auth::AuthContext;
pub use config::FeedlineConfig;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use feedline::{Components, Feedline};
pub use views::{Created, FeedItem, PostView, Profile};

// Re-export key types
pub use feedline_types::{Clock, ManualClock, PostId, SystemClock, Timestamp, UserId, UserSummary};
