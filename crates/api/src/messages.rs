//! User-facing message rendering.
//!
//! The core only emits message keys. Handlers turn keys into text through a
//! `MessageCatalog`, which is injected via `AppState` so deployments can swap
//! in a translated catalog.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Keys emitted by the HTTP layer itself.
pub mod keys {
    /// A required request field was absent.
    pub const MISSING_PARAMETERS: &str = "request.missing_parameters";
    /// Registration succeeded.
    pub const REGISTERED: &str = "register.success";
    /// Deposit succeeded.
    pub const DEPOSIT_SUCCESS: &str = "deposit.success";
    /// Withdrawal succeeded.
    pub const WITHDRAW_SUCCESS: &str = "withdraw.success";
    /// Rate limit hit.
    pub const RATE_LIMITED: &str = "rate_limit.exceeded";
    /// No bearer token.
    pub const MISSING_TOKEN: &str = "auth.missing_token";
    /// Bearer token expired.
    pub const TOKEN_EXPIRED: &str = "auth.token_expired";
    /// Bearer token malformed or forged.
    pub const INVALID_TOKEN: &str = "auth.invalid_token";
    /// Catch-all for unexpected failures.
    pub const INTERNAL: &str = "internal";
}

/// Looks up display text for a message key.
pub trait MessageCatalog: Send + Sync {
    /// Returns the text for `key`, or `None` if this catalog lacks it.
    fn lookup(&self, key: &str) -> Option<Cow<'static, str>>;

    /// Returns the text for `key`, falling back to the key itself.
    fn render(&self, key: &str) -> Cow<'static, str> {
        self.lookup(key)
            .unwrap_or_else(|| Cow::Owned(key.to_string()))
    }
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn lookup(&self, key: &str) -> Option<Cow<'static, str>> {
        let text = match key {
            "identity.invalid_name" => "Invalid name. Name should be a non-empty string.",
            "identity.invalid_age" => "Invalid age. Age should be a positive integer.",
            "identity.invalid_gender" => {
                "Invalid gender. Gender should be 'Male', 'Female', or 'Other'."
            }
            "identity.credential_failure" => "An error occurred during registration",
            "amount.not_a_number" => "Invalid amount. Please provide a valid number.",
            "amount.out_of_range" => "Amount is outside the supported range.",
            "deposit.non_positive" => "Deposit amount should be greater than zero.",
            "withdraw.non_positive" => "Withdrawal amount should be greater than zero.",
            "withdraw.insufficient_funds" => "Insufficient funds.",
            "registry.not_found" => "User not found",
            "auth.invalid_credentials" => "Invalid credentials",
            keys::MISSING_PARAMETERS => "Missing required parameters",
            keys::REGISTERED => "User registered successfully",
            keys::DEPOSIT_SUCCESS => "Deposit successful",
            keys::WITHDRAW_SUCCESS => "Withdrawal successful",
            keys::RATE_LIMITED => "Too many requests. Please retry later.",
            keys::MISSING_TOKEN => "Authorization header with Bearer token is required",
            keys::TOKEN_EXPIRED => "Token has expired",
            keys::INVALID_TOKEN => "Invalid or malformed token",
            keys::INTERNAL => "An internal error occurred",
            _ => return None,
        };
        Some(Cow::Borrowed(text))
    }
}

/// A catalog of overrides layered over a fallback catalog.
///
/// Useful for shipping a partial translation on top of `EnglishCatalog`.
pub struct OverlayCatalog {
    overrides: HashMap<String, String>,
    fallback: Arc<dyn MessageCatalog>,
}

impl OverlayCatalog {
    /// Creates an overlay over `fallback`.
    #[must_use]
    pub fn new(overrides: HashMap<String, String>, fallback: Arc<dyn MessageCatalog>) -> Self {
        Self {
            overrides,
            fallback,
        }
    }
}

impl MessageCatalog for OverlayCatalog {
    fn lookup(&self, key: &str) -> Option<Cow<'static, str>> {
        self.overrides
            .get(key)
            .map(|text| Cow::Owned(text.clone()))
            .or_else(|| self.fallback.lookup(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_covers_core_keys() {
        let catalog = EnglishCatalog;
        for key in [
            "identity.invalid_name",
            "identity.invalid_age",
            "identity.invalid_gender",
            "amount.not_a_number",
            "deposit.non_positive",
            "withdraw.non_positive",
            "withdraw.insufficient_funds",
            "registry.not_found",
            "auth.invalid_credentials",
        ] {
            assert!(catalog.lookup(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn unknown_key_renders_as_itself() {
        assert_eq!(EnglishCatalog.render("no.such.key"), "no.such.key");
    }

    #[test]
    fn overlay_prefers_overrides() {
        let overlay = OverlayCatalog::new(
            HashMap::from([(keys::DEPOSIT_SUCCESS.to_string(), "Depósito exitoso".to_string())]),
            Arc::new(EnglishCatalog),
        );

        assert_eq!(overlay.render(keys::DEPOSIT_SUCCESS), "Depósito exitoso");
        assert_eq!(overlay.render(keys::WITHDRAW_SUCCESS), "Withdrawal successful");
    }
}
