//! Registration and authentication routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use teller_core::{Age, BankError, Gender};
use teller_shared::{
    AuthMode,
    auth::{AuthenticateRequest, RegisterRequest, TokenResponse},
};
use tracing::{error, info};

use super::{bank_error, json_body, required};
use crate::{AppState, error::ApiError, messages::keys};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/authenticate", post(authenticate))
}

/// POST /register - Register a new identity with a zero-balance account.
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = json_body(payload, &state)?;
    let name = required(payload.name, &state)?;
    let age = required(payload.age, &state)?;
    let gender = required(payload.gender, &state)?;
    let password = match state.auth_mode {
        AuthMode::Credentials => Some(required(payload.password, &state)?),
        AuthMode::NameOnly => payload.password,
    };

    let invalid = |e| bank_error(&state, &BankError::Identity(e));
    let age = Age::from_json(&age).map_err(invalid)?;
    let gender = Gender::from_json(&gender).map_err(invalid)?;

    let bank = state.bank.clone();
    tokio::task::spawn_blocking(move || {
        bank.create_identity(
            &name,
            i64::from(age.years()),
            gender.as_str(),
            password.as_deref(),
        )
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Registration task failed");
        ApiError::internal(state.messages.as_ref())
    })?
    .map_err(|e| bank_error(&state, &e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": state.messages.render(keys::REGISTERED) })),
    )
        .into_response())
}

/// POST /authenticate - Check an identity and, with credentials, issue a token.
async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = json_body(payload, &state)?;
    let name = required(payload.name, &state)?;

    match state.auth_mode {
        AuthMode::Credentials => {
            let password = required(payload.password, &state)?;
            issue_token(&state, name, password).await
        }
        AuthMode::NameOnly => {
            let status = match state.bank.authenticate(&name, None) {
                Ok(_) => StatusCode::OK,
                Err(BankError::NotFound(_)) => StatusCode::UNAUTHORIZED,
                Err(e) => return Err(bank_error(&state, &e)),
            };
            let authenticated = status == StatusCode::OK;
            Ok((status, Json(json!({ "authenticated": authenticated }))).into_response())
        }
    }
}

async fn issue_token(
    state: &AppState,
    name: String,
    password: String,
) -> Result<Response, ApiError> {
    let bank = state.bank.clone();
    let identity = tokio::task::spawn_blocking(move || bank.authenticate(&name, Some(&password)))
        .await
        .map_err(|e| {
            error!(error = %e, "Authentication task failed");
            ApiError::internal(state.messages.as_ref())
        })?
        .map_err(|e| bank_error(state, &e))?;

    let access_token = state
        .jwt_service
        .generate_access_token(identity.name())
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            ApiError::internal(state.messages.as_ref())
        })?;

    info!(name = %identity.name(), "Identity authenticated");

    Ok((
        StatusCode::OK,
        Json(TokenResponse::bearer(
            access_token,
            state.jwt_service.access_token_expires_in(),
        )),
    )
        .into_response())
}
