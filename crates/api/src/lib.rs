//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication and rate-limit middleware
//! - Message rendering for user-facing text

pub mod error;
pub mod messages;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{Router, http::header::AUTHORIZATION};
use teller_core::BankService;
use teller_shared::{AppConfig, AuthMode, JwtConfig, JwtService};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    trace::TraceLayer,
};

use crate::messages::{EnglishCatalog, MessageCatalog};
use crate::middleware::RateLimiter;

/// Rate limiters for the two route groups.
#[derive(Clone)]
pub struct RateLimits {
    /// Whether limiters are installed at all.
    pub enabled: bool,
    /// Limiter for non-mutating routes.
    pub default: Arc<RateLimiter>,
    /// Limiter for deposit and withdraw.
    pub bank: Arc<RateLimiter>,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registry and account state.
    pub bank: Arc<BankService>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Catalog that renders message keys.
    pub messages: Arc<dyn MessageCatalog>,
    /// How bank routes identify the caller.
    pub auth_mode: AuthMode,
    /// Per-group rate limiters.
    pub rate_limits: RateLimits,
}

impl AppState {
    /// Builds state from configuration with the English catalog.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            bank: Arc::new(BankService::new(config.accounts.retention)),
            jwt_service: Arc::new(JwtService::new(JwtConfig::from(&config.jwt))),
            messages: Arc::new(EnglishCatalog),
            auth_mode: config.auth.mode,
            rate_limits: RateLimits {
                enabled: config.rate_limit.enabled,
                default: Arc::new(RateLimiter::new(config.rate_limit.default_limits.clone())),
                bank: Arc::new(RateLimiter::new(config.rate_limit.bank_limits.clone())),
            },
        }
    }

    /// Replaces the message catalog.
    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageCatalog>) -> Self {
        self.messages = messages;
        self
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(&state))
        .layer(
            ServiceBuilder::new()
                .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
