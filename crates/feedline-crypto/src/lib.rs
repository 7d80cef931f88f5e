//! Credential digests for Feedline.
//!
//! Password hashing is an opaque capability to the rest of the system:
//! `hash(password) -> digest` and `verify(password, digest) -> bool`. The
//! [`CredentialHasher`] trait is that boundary; [`Argon2Hasher`] is the
//! production implementation, emitting PHC-format argon2id strings.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod hasher;

pub use hasher::{Argon2Hasher, CredentialHasher, CryptoError};
