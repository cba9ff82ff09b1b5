//! HTTP rendering of application errors.

use axum::{
    Json,
    http::{StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde_json::json;
use teller_core::{BankError, ErrorKind};
use teller_shared::AppError;
use tracing::error;

use crate::messages::{MessageCatalog, keys};

/// An `AppError` that can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Maps a core error to its HTTP category, rendering the message through
    /// `messages`.
    pub fn from_bank(err: &BankError, messages: &dyn MessageCatalog) -> Self {
        let message = messages.render(err.message_key()).into_owned();
        let app_error = match err.kind() {
            ErrorKind::InvalidName
            | ErrorKind::InvalidAge
            | ErrorKind::InvalidGender
            | ErrorKind::InvalidAmount => AppError::Validation(message),
            ErrorKind::InsufficientFunds => AppError::BusinessRule(message),
            ErrorKind::NotFound => AppError::NotFound(message),
            ErrorKind::InvalidCredential => AppError::Unauthorized(message),
            ErrorKind::Internal => {
                error!(error = %err, "Internal error while handling request");
                AppError::Internal(message)
            }
        };
        Self(app_error)
    }

    /// A required request field was absent.
    pub fn missing_parameters(messages: &dyn MessageCatalog) -> Self {
        Self(AppError::Validation(
            messages.render(keys::MISSING_PARAMETERS).into_owned(),
        ))
    }

    /// Unexpected failure outside the core (e.g. a panicked blocking task).
    pub fn internal(messages: &dyn MessageCatalog) -> Self {
        Self(AppError::Internal(messages.render(keys::INTERNAL).into_owned()))
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": self.0.error_code(),
            "message": self.0.message(),
        }));

        match &self.0 {
            AppError::RateLimited {
                retry_after_secs, ..
            } => (status, [(RETRY_AFTER, retry_after_secs.to_string())], body).into_response(),
            _ => (status, body).into_response(),
        }
    }
}
