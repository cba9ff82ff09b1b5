//! Bearer token middleware for bank routes.

use std::convert::Infallible;

use axum::{
    extract::{OptionalFromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use teller_shared::{AppError, Claims, JwtError};
use tracing::debug;

use crate::{AppState, error::ApiError, messages::keys};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return unauthorized(&state, keys::MISSING_TOKEN);
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(JwtError::Expired) => unauthorized(&state, keys::TOKEN_EXPIRED),
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            unauthorized(&state, keys::INVALID_TOKEN)
        }
    }
}

fn unauthorized(state: &AppState, key: &str) -> Response {
    ApiError(AppError::Unauthorized(state.messages.render(key).into_owned())).into_response()
}

/// Extractor for authenticated identity claims.
///
/// Extracted as `Option<AuthUser>`: present once `auth_middleware` has
/// accepted a token, absent on routes served in name-only mode.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the identity name from the claims.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name()
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Claims>().cloned().map(AuthUser))
    }
}
