//! Request middleware.

pub mod auth;
pub mod rate_limit;

pub use auth::{AuthUser, auth_middleware};
pub use rate_limit::{RateLimitState, RateLimiter, rate_limit_middleware};
