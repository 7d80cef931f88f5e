//! Social graph for Feedline.
//!
//! The graph is a set of directed [`FollowEdge`]s. An edge `(a, b)` means
//! `a` follows `b` and receives `b`'s posts in their feed.
//!
//! # Invariants
//!
//! - An edge exists at most once. `follow` checks and inserts atomically.
//! - No self-loops: `follow(a, a)` fails with [`GraphError::SelfFollow`].
//!   A user's own posts are always part of their feed, so a self edge would
//!   carry no meaning.
//! - `followers_of` and `following_of` are mirror images of each other.
//!
//! # Modules
//!
//! - [`error`]: Error types for graph operations
//! - [`traits`]: The [`FollowGraph`] trait
//! - [`memory`]: In-memory [`InMemoryFollowGraph`]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{GraphError, GraphResult};
pub use feedline_types::FollowEdge;
pub use memory::InMemoryFollowGraph;
pub use traits::FollowGraph;
