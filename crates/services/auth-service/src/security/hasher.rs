//! Credential hashing.

use common::AppResult;
use domain::Password;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One-way hashing of raw secrets.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a raw secret for storage
    fn hash(&self, raw: &str) -> AppResult<String>;

    /// Check a raw secret against a stored hash
    fn verify(&self, raw: &str, hash: &str) -> bool;
}

/// Argon2id hasher backed by the domain `Password` value object.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, raw: &str) -> AppResult<String> {
        Ok(Password::new(raw)?.into_string())
    }

    fn verify(&self, raw: &str, hash: &str) -> bool {
        Password::from_hash(hash).verify(raw)
    }
}
