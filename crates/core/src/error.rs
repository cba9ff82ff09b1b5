//! Error kinds surfaced by the bank service.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::account::AccountError;
use crate::identity::IdentityError;

/// Coarse classification callers map to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Empty identity name.
    InvalidName,
    /// Age is not a positive integer.
    InvalidAge,
    /// Gender outside the fixed set.
    InvalidGender,
    /// Amount is non-numeric or not strictly positive.
    InvalidAmount,
    /// Withdrawal exceeds the balance.
    InsufficientFunds,
    /// Unknown identity name.
    NotFound,
    /// Secret did not verify.
    InvalidCredential,
    /// Unexpected failure.
    Internal,
}

impl ErrorKind {
    /// Snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidName => "invalid_name",
            Self::InvalidAge => "invalid_age",
            Self::InvalidGender => "invalid_gender",
            Self::InvalidAmount => "invalid_amount",
            Self::InsufficientFunds => "insufficient_funds",
            Self::NotFound => "not_found",
            Self::InvalidCredential => "invalid_credential",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by `BankService` operations.
#[derive(Debug, Error)]
pub enum BankError {
    /// Identity construction failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Deposit or withdrawal rejected.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// No identity with this name.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Name or secret did not match.
    #[error("Invalid credentials")]
    InvalidCredential,

    /// Unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BankError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(IdentityError::InvalidName) => ErrorKind::InvalidName,
            Self::Identity(IdentityError::InvalidAge) => ErrorKind::InvalidAge,
            Self::Identity(IdentityError::InvalidGender) => ErrorKind::InvalidGender,
            Self::Identity(IdentityError::Credential(_)) | Self::Internal(_) => {
                ErrorKind::Internal
            }
            Self::Account(AccountError::InvalidAmount(_)) => ErrorKind::InvalidAmount,
            Self::Account(AccountError::InsufficientFunds { .. }) => {
                ErrorKind::InsufficientFunds
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidCredential => ErrorKind::InvalidCredential,
        }
    }

    /// Stable message key for catalog lookups and log events.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Identity(e) => e.message_key(),
            Self::Account(e) => e.message_key(),
            Self::NotFound(_) => "registry.not_found",
            Self::InvalidCredential => "auth.invalid_credentials",
            Self::Internal(_) => "internal",
        }
    }
}
