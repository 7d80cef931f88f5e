//! Append-only post store for Feedline.
//!
//! Posts are never mutated or deleted once written. Ids are allocated in
//! insertion order, which the feed order uses to break timestamp ties.
//!
//! - [`PostStore`]: storage boundary, with [`InMemoryPostStore`]
//! - [`PostService`]: validates content and stamps posts from a
//!   [`feedline_types::Clock`]

pub mod error;
pub mod memory;
pub mod service;
pub mod traits;

pub use error::{PostError, PostResult};
pub use memory::InMemoryPostStore;
pub use service::PostService;
pub use traits::PostStore;
