//! Feed assembly for Feedline.
//!
//! A user's feed is every post written by the user or by anyone they
//! currently follow, newest first. Ties on timestamp go to the post with the
//! higher id (the later insert), giving a deterministic total order.

pub mod assembler;
pub mod error;

pub use assembler::FeedAssembler;
pub use error::{FeedError, FeedResult};
