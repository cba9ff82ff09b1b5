//! JWT token generation and validation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::Claims;
use crate::config::JwtSettings;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expires_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: crate::config::DEFAULT_JWT_SECRET.to_string(),
            access_token_expires_secs: 900,
        }
    }
}

impl From<&JwtSettings> for JwtConfig {
    fn from(settings: &JwtSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            access_token_expires_secs: i64::try_from(settings.access_token_expiry_secs)
                .unwrap_or(i64::MAX),
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field(
                "access_token_expires_secs",
                &self.config.access_token_expires_secs,
            )
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generates an access token whose subject is the identity name.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails or the
    /// configured lifetime does not fit a timestamp.
    pub fn generate_access_token(&self, name: &str) -> Result<String, JwtError> {
        let expires_at = TimeDelta::try_seconds(self.config.access_token_expires_secs)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| JwtError::EncodingError("token lifetime out of range".into()))?;
        let claims = Claims::new(name, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or forged.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Returns the access token expiration in seconds.
    #[must_use]
    pub const fn access_token_expires_in(&self) -> i64 {
        self.config.access_token_expires_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service(secret: &str) -> JwtService {
        JwtService::new(JwtConfig {
            secret: secret.to_string(),
            access_token_expires_secs: 900,
        })
    }

    #[test]
    fn test_validate_token_round_trip() {
        let service = create_test_service("test-secret-key-for-testing");

        let token = service.generate_access_token("Edison").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.name(), "Edison");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = create_test_service("one-secret");
        let verifier = create_test_service("another-secret");

        let token = issuer.generate_access_token("Edison").unwrap();
        assert!(matches!(
            verifier.validate_token(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new(JwtConfig {
            secret: "expiry".to_string(),
            access_token_expires_secs: -600,
        });

        let token = service.generate_access_token("Edison").unwrap();
        assert!(matches!(service.validate_token(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service("test-secret-key-for-testing");
        assert!(service.validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_config_from_settings() {
        let settings = JwtSettings {
            secret: "s".into(),
            access_token_expiry_secs: 1800,
        };
        let config = JwtConfig::from(&settings);
        assert_eq!(config.access_token_expires_secs, 1800);

        let service = JwtService::new(config);
        assert_eq!(service.access_token_expires_in(), 1800);
    }

    #[test]
    fn test_expiry_keeps_sub_minute_precision() {
        for secs in [30, 119] {
            let service = JwtService::new(JwtConfig::from(&JwtSettings {
                secret: "s".into(),
                access_token_expiry_secs: secs,
            }));
            assert_eq!(service.access_token_expires_in(), i64::try_from(secs).unwrap());

            let token = service.generate_access_token("Edison").unwrap();
            let claims = service.validate_token(&token).unwrap();
            // iat is read a moment after exp is fixed, possibly across a second boundary.
            let lifetime = claims.exp - claims.iat;
            let expected = service.access_token_expires_in();
            assert!((expected - 1..=expected).contains(&lifetime), "{lifetime}");
        }
    }

    #[test]
    fn test_huge_expiry_errors_instead_of_panicking() {
        let service = JwtService::new(JwtConfig::from(&JwtSettings {
            secret: "s".into(),
            access_token_expiry_secs: u64::MAX,
        }));

        assert_eq!(service.access_token_expires_in(), i64::MAX);
        assert!(matches!(
            service.generate_access_token("Edison"),
            Err(JwtError::EncodingError(_))
        ));
    }
}
