//! Application configuration management.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// JWT configuration.
    #[serde(default)]
    pub jwt: JwtSettings,
    /// Authentication mode.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Account state handling.
    #[serde(default)]
    pub accounts: AccountsConfig,
    /// Request rate limiting.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// JWT configuration as read from config sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    #[serde(default = "default_jwt_secret")]
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            access_token_expiry_secs: default_access_token_expiry(),
        }
    }
}

/// Placeholder secret; the server warns when it is still in use.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// How callers prove who they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Identities carry a password; bank routes require a Bearer token.
    #[default]
    Credentials,
    /// Identities have no password; bank routes name the identity directly.
    NameOnly,
}

/// Authentication configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AuthConfig {
    /// Active authentication mode.
    #[serde(default)]
    pub mode: AuthMode,
}

/// Whether account balances survive between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRetention {
    /// Balances are kept per identity name for the process lifetime.
    #[default]
    Persistent,
    /// Every call starts from a fresh zero-balance account.
    ResetPerCall,
}

/// Account configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AccountsConfig {
    /// Retention policy for balances.
    #[serde(default)]
    pub retention: AccountRetention,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Master switch for all limiters.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Limits applied to every non-mutating route.
    #[serde(default = "default_limits")]
    pub default_limits: Vec<RateLimitRule>,
    /// Limits applied to deposit and withdraw.
    #[serde(default = "default_bank_limits")]
    pub bank_limits: Vec<RateLimitRule>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_limits: default_limits(),
            bank_limits: default_bank_limits(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_limits() -> Vec<RateLimitRule> {
    vec![
        RateLimitRule::new(1000, Duration::from_secs(86_400)),
        RateLimitRule::new(200, Duration::from_secs(3_600)),
    ]
}

fn default_bank_limits() -> Vec<RateLimitRule> {
    vec![RateLimitRule::new(1000, Duration::from_secs(86_400))]
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub filter: Option<String>,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

/// A single "N per unit" limit, e.g. `200 per hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct RateLimitRule {
    /// Maximum hits allowed inside the window.
    pub max_hits: u32,
    /// Length of the sliding window.
    pub window: Duration,
}

impl RateLimitRule {
    /// Creates a rule allowing `max_hits` per `window`.
    #[must_use]
    pub const fn new(max_hits: u32, window: Duration) -> Self {
        Self { max_hits, window }
    }
}

/// Error returned when a rate limit rule string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid rate limit rule '{0}', expected e.g. '200 per hour'")]
pub struct RateLimitRuleError(pub String);

impl FromStr for RateLimitRule {
    type Err = RateLimitRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RateLimitRuleError(s.to_string());
        let lowered = s.trim().to_lowercase();
        let mut parts = lowered.split_whitespace();

        let max_hits = parts
            .next()
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .ok_or_else(invalid)?;

        match parts.next() {
            Some("per" | "/") => {}
            _ => return Err(invalid()),
        }

        let unit_secs = match parts.next() {
            Some("second" | "seconds") => 1,
            Some("minute" | "minutes") => 60,
            Some("hour" | "hours") => 3_600,
            Some("day" | "days") => 86_400,
            _ => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(max_hits, Duration::from_secs(unit_secs)))
    }
}

impl TryFrom<String> for RateLimitRule {
    type Error = RateLimitRuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RateLimitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.window.as_secs() {
            1 => "second",
            60 => "minute",
            3_600 => "hour",
            86_400 => "day",
            secs => return write!(f, "{} per {secs} seconds", self.max_hits),
        };
        write!(f, "{} per {unit}", self.max_hits)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TELLER")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("rate_limit.default_limits")
                    .with_list_parse_key("rate_limit.bank_limits"),
            )
            .build()?;

        config.try_deserialize()
    }
}
