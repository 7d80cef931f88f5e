//! Foundation types for Feedline.
//!
//! This crate provides the identifier, temporal, and record types shared by
//! every other Feedline crate.
//!
//! # Key Types
//!
//! - [`UserId`] / [`PostId`]: Sequentially allocated identifiers
//! - [`Timestamp`]: UTC instant with a total order
//! - [`Clock`]: Source of post timestamps ([`SystemClock`], [`ManualClock`])
//! - [`User`] / [`UserSummary`]: Account record and its public projection
//! - [`Post`]: Append-only post record, ordered by [`feed_order`]
//! - [`FollowEdge`]: Directed follower → followed relationship

pub mod error;
pub mod follow;
pub mod ids;
pub mod post;
pub mod temporal;
pub mod user;

pub use error::TypeError;
pub use follow::FollowEdge;
pub use ids::{PostId, UserId};
pub use post::{content_length, feed_order, Post, DEFAULT_MAX_POST_CHARS};
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
pub use user::{PasswordDigest, User, UserSummary};
