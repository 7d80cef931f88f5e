use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use feedline_types::PasswordDigest;

/// One-way password digest capability.
///
/// Implementations must be thread-safe and must never return the plaintext
/// inside a digest. `verify` returns `false` for malformed digests rather
/// than erroring: a digest that cannot be parsed cannot match.
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted digest of `password`.
    fn hash(&self, password: &str) -> Result<PasswordDigest, CryptoError>;

    /// Check `password` against a digest previously produced by `hash`.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;
}

/// Argon2id hasher with a random per-password salt.
///
/// Digests are PHC strings (`$argon2id$v=19$m=...`) that carry their own
/// parameters, so a digest made with one parameter set verifies under any
/// `Argon2Hasher`.
pub struct Argon2Hasher {
    argon: Argon2<'static>,
}

impl Argon2Hasher {
    /// Hasher using the argon2 crate's recommended default parameters.
    pub fn new() -> Self {
        Self {
            argon: Argon2::default(),
        }
    }

    /// Hasher with explicit cost parameters.
    pub fn with_params(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, CryptoError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|e| CryptoError::InvalidParams(e.to_string()))?;
        Ok(Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Minimum-cost hasher for tests and demos. Not for production use.
    pub fn lightweight() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .unwrap_or_default();
        Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, CryptoError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CryptoError::Hashing(e.to_string()))?;
        Ok(PasswordDigest::new(hash.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        let parsed = match PasswordHash::new(digest.as_str()) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::error!("failed to parse password digest: {}", err);
                return false;
            }
        };
        self.argon
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Errors from credential operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("invalid hasher parameters: {0}")]
    InvalidParams(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = Argon2Hasher::lightweight();
        let digest = hasher.hash("pw123").unwrap();
        assert!(hasher.verify("pw123", &digest));
        assert!(!hasher.verify("pw124", &digest));
    }

    #[test]
    fn digest_never_contains_plaintext() {
        let hasher = Argon2Hasher::lightweight();
        let digest = hasher.hash("correct horse battery staple").unwrap();
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(!digest.as_str().contains("correct horse"));
    }

    #[test]
    fn salts_differ_per_hash() {
        let hasher = Argon2Hasher::lightweight();
        let a = hasher.hash("same").unwrap();
        let b = hasher.hash("same").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("same", &a));
        assert!(hasher.verify("same", &b));
    }

    #[test]
    fn digests_verify_across_parameter_sets() {
        let light = Argon2Hasher::lightweight();
        let custom = Argon2Hasher::with_params(64, 1, 1).unwrap();
        let digest = custom.hash("pw").unwrap();
        assert!(light.verify("pw", &digest));
    }

    #[test]
    fn malformed_digest_does_not_verify() {
        let hasher = Argon2Hasher::lightweight();
        assert!(!hasher.verify("pw", &PasswordDigest::new("not-a-phc-string")));
    }

    #[test]
    fn rejects_invalid_params() {
        let err = Argon2Hasher::with_params(1, 0, 0).err().unwrap();
        assert!(matches!(err, CryptoError::InvalidParams(_)));
    }
}
