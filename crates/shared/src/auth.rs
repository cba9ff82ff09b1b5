//! Authentication types for JWT and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JWT claims for access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity name).
    pub sub: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an identity.
    #[must_use]
    pub fn new(name: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: name.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the identity name from claims.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.sub
    }
}

/// Registration request payload.
///
/// Every field is optional at the wire level so handlers can answer with a
/// uniform "missing parameters" error. `age` and `gender` stay raw JSON so a
/// wrongly-typed value is reported as invalid rather than as a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    /// Identity name.
    pub name: Option<String>,
    /// Password (required in credentials mode).
    pub password: Option<String>,
    /// Age, expected to be a positive JSON integer.
    pub age: Option<Value>,
    /// Gender, one of "Male", "Female", "Other".
    pub gender: Option<Value>,
}

/// Authentication request payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthenticateRequest {
    /// Identity name.
    pub name: Option<String>,
    /// Password (ignored in name-only mode).
    pub password: Option<String>,
}

/// Deposit/withdraw request payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmountRequest {
    /// Identity name (name-only mode).
    pub name: Option<String>,
    /// Amount as a JSON number or numeric string.
    pub amount: Option<Value>,
}

/// Balance query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BalanceQuery {
    /// Identity name (name-only mode).
    pub name: Option<String>,
}

/// Token returned after successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Always "Bearer".
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Wraps an access token as a Bearer token response.
    #[must_use]
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
