//! Deposit, withdraw, and balance routes.
//!
//! In credentials mode the identity comes from the bearer token and any
//! `name` in the request is ignored. In name-only mode `name` is required.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use teller_core::{BalanceView, BankError, account::parse_amount};
use teller_shared::{
    AppError, AuthMode,
    auth::{AmountRequest, BalanceQuery},
};

use super::{bank_error, json_body, required};
use crate::{AppState, error::ApiError, messages::keys, middleware::AuthUser};

/// Balance after a successful deposit or withdrawal.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Rendered success message.
    pub message: String,
    /// New balance.
    pub balance: Decimal,
}

/// Routes that only read account state.
pub fn read_routes() -> Router<AppState> {
    Router::new().route("/bank/balance", get(balance))
}

/// Routes that move money.
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/bank/deposit", post(deposit))
        .route("/bank/withdraw", post(withdraw))
}

/// POST /bank/deposit
async fn deposit(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let (name, amount) = transaction_input(&state, user, payload)?;
    let balance = state
        .bank
        .deposit(&name, amount)
        .map_err(|e| bank_error(&state, &e))?;

    Ok(Json(TransactionResponse {
        message: state.messages.render(keys::DEPOSIT_SUCCESS).into_owned(),
        balance,
    }))
}

/// POST /bank/withdraw
async fn withdraw(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let (name, amount) = transaction_input(&state, user, payload)?;
    let balance = state
        .bank
        .withdraw(&name, amount)
        .map_err(|e| bank_error(&state, &e))?;

    Ok(Json(TransactionResponse {
        message: state.messages.render(keys::WITHDRAW_SUCCESS).into_owned(),
        balance,
    }))
}

/// GET /bank/balance
async fn balance(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<BalanceView>, ApiError> {
    let name = resolve_owner(&state, user, query.name)?;
    state
        .bank
        .view_balance(&name)
        .map(Json)
        .map_err(|e| bank_error(&state, &e))
}

fn transaction_input(
    state: &AppState,
    user: Option<AuthUser>,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<(String, Decimal), ApiError> {
    let payload = json_body(payload, state)?;
    let amount = required(payload.amount, state)?;
    let name = resolve_owner(state, user, payload.name)?;
    let amount = parse_amount(&amount).map_err(|e| bank_error(state, &BankError::from(e)))?;
    Ok((name, amount))
}

/// Picks the identity a bank call acts on.
fn resolve_owner(
    state: &AppState,
    user: Option<AuthUser>,
    name: Option<String>,
) -> Result<String, ApiError> {
    match state.auth_mode {
        AuthMode::Credentials => user.map(|user| user.name().to_string()).ok_or_else(|| {
            ApiError(AppError::Unauthorized(
                state.messages.render(keys::MISSING_TOKEN).into_owned(),
            ))
        }),
        AuthMode::NameOnly => required(name, state),
    }
}
