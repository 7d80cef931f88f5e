//! Identity store for Feedline.
//!
//! Holds user records and verifies credentials. Registration validates the
//! submitted fields, digests the password through a
//! [`feedline_crypto::CredentialHasher`], and inserts the account with its
//! uniqueness checks applied atomically by the backing [`UserStore`].
//!
//! # Modules
//!
//! - [`error`]: Error types for identity operations
//! - [`traits`]: The [`UserStore`] trait defining the storage interface
//! - [`memory`]: In-memory [`InMemoryUserStore`]
//! - [`validation`]: Username and email rules
//! - [`service`]: [`IdentityService`]: register, authenticate, change password

pub mod error;
pub mod memory;
pub mod service;
pub mod traits;
pub mod validation;

pub use error::{IdentityError, IdentityResult};
pub use memory::InMemoryUserStore;
pub use service::IdentityService;
pub use traits::{NewUser, UserStore};
pub use validation::{normalize_email, IdentityLimits};
