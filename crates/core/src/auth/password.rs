//! Secret hashing with Argon2id.
//!
//! Uses the recommended Argon2id variant with secure defaults. Verification is
//! the only way to test a secret; the raw value is never retained.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to hash secret.
    #[error("failed to hash secret: {0}")]
    Hash(String),

    /// Failed to verify secret.
    #[error("failed to verify secret: {0}")]
    Verify(String),

    /// Stored hash is not a valid PHC string.
    #[error("invalid credential hash format")]
    InvalidHash,
}

/// A stored credential in PHC string format.
///
/// `Debug` never prints the hash itself.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Hashes `secret` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hash` if hashing fails.
    pub fn from_secret(secret: &str) -> Result<Self, CredentialError> {
        hash_secret(secret).map(Self)
    }

    /// Returns true if `secret` matches this hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    pub fn verify(&self, secret: &str) -> Result<bool, CredentialError> {
        verify_secret(secret, &self.0)
    }

    /// Returns the PHC string.
    #[must_use]
    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CredentialHash([hidden])")
    }
}

/// Hashes a secret using Argon2id.
///
/// # Errors
///
/// Returns `CredentialError::Hash` if hashing fails.
///
/// # Example
///
/// ```
/// use teller_core::auth::hash_secret;
///
/// let hash = hash_secret("my_secure_password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_secret(secret: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Verifies a secret against a PHC hash.
///
/// Argon2 compares digests in constant time.
///
/// # Errors
///
/// Returns `CredentialError::InvalidHash` if the hash format is invalid.
/// Returns `CredentialError::Verify` if verification fails unexpectedly.
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, CredentialError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| CredentialError::InvalidHash)?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Verify(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_and_not_plaintext() {
        let hash = hash_secret("s3cret!").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("s3cret!"));
    }

    #[test]
    fn test_verify_matches_only_stored_secret() {
        let stored = CredentialHash::from_secret("correct horse").unwrap();

        assert!(stored.verify("correct horse").unwrap());
        assert!(!stored.verify("wrong horse").unwrap());
    }

    #[test]
    fn test_same_secret_salted_differently() {
        let first = hash_secret("password1").unwrap();
        let second = hash_secret("password1").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_debug_is_redacted() {
        let stored = CredentialHash::from_secret("pw").unwrap();
        let rendered = format!("{stored:?}");

        assert_eq!(rendered, "CredentialHash([hidden])");
        assert!(!rendered.contains(stored.as_phc()));
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_secret("password", "invalid_hash");
        assert!(matches!(result, Err(CredentialError::InvalidHash)));
    }
}
