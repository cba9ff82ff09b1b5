//! Identity validation errors.

use thiserror::Error;

use crate::auth::CredentialError;

/// Errors raised while constructing an identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Name is empty or whitespace only.
    #[error("Invalid name. Name should be a non-empty string.")]
    InvalidName,

    /// Age is not a positive integer.
    #[error("Invalid age. Age should be a positive integer.")]
    InvalidAge,

    /// Gender is outside the fixed set.
    #[error("Invalid gender. Gender should be 'Male', 'Female', or 'Other'.")]
    InvalidGender,

    /// Hashing the supplied secret failed.
    #[error("Credential could not be stored: {0}")]
    Credential(#[from] CredentialError),
}

impl IdentityError {
    /// Stable message key for catalog lookups and log events.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidName => "identity.invalid_name",
            Self::InvalidAge => "identity.invalid_age",
            Self::InvalidGender => "identity.invalid_gender",
            Self::Credential(_) => "identity.credential_failure",
        }
    }
}
