//! Shared configuration, errors, and auth types for Teller.
//!
//! This crate provides common types used across all other crates:
//! - Layered application configuration
//! - Application-wide error type with HTTP mapping
//! - JWT claims, token service, and request/response payloads

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;


pub use auth::Claims;
pub use config::{AccountRetention, AppConfig, AuthMode, RateLimitRule};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
