//! API route definitions.

use std::sync::Arc;

use axum::{Json, Router, extract::rejection::JsonRejection, middleware};
use teller_core::BankError;
use teller_shared::AuthMode;
use tracing::debug;

use crate::{
    AppState,
    error::ApiError,
    middleware::{RateLimitState, RateLimiter, auth_middleware, rate_limit_middleware},
};

pub mod auth;
pub mod bank;
pub mod health;

/// Creates the API router, wiring limiters and authentication from `state`.
pub fn api_routes_with_state(state: &AppState) -> Router<AppState> {
    let limits = &state.rate_limits;

    let public = limited(
        Router::new().merge(health::routes()).merge(auth::routes()),
        state,
        &limits.default,
    );

    let mut bank_routes = limited(bank::read_routes(), state, &limits.default)
        .merge(limited(bank::write_routes(), state, &limits.bank));

    // Protected routes that require a bearer token
    if state.auth_mode == AuthMode::Credentials {
        bank_routes =
            bank_routes.route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
    }

    Router::new().merge(public).merge(bank_routes)
}

fn limited(
    router: Router<AppState>,
    state: &AppState,
    limiter: &Arc<RateLimiter>,
) -> Router<AppState> {
    if !state.rate_limits.enabled {
        return router;
    }
    router.route_layer(middleware::from_fn_with_state(
        RateLimitState {
            limiter: Arc::clone(limiter),
            messages: Arc::clone(&state.messages),
        },
        rate_limit_middleware,
    ))
}

/// Unwraps a JSON body, treating an unreadable body like an empty one.
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    state: &AppState,
) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        ApiError::missing_parameters(state.messages.as_ref())
    })
}

/// Requires a field to be present.
fn required<T>(field: Option<T>, state: &AppState) -> Result<T, ApiError> {
    field.ok_or_else(|| ApiError::missing_parameters(state.messages.as_ref()))
}

/// Renders a core error through the state's catalog.
fn bank_error(state: &AppState, err: &BankError) -> ApiError {
    ApiError::from_bank(err, state.messages.as_ref())
}
