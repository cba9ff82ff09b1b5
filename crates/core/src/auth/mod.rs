//! Credential hashing.
//!
//! This module provides:
//! - One-way salted hashing of secrets with Argon2id
//! - Verification of a secret against a stored hash
//! - A redacting wrapper for stored hashes

mod password;

pub use password::{CredentialError, CredentialHash, hash_secret, verify_secret};
