use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warfront_application::RegisterError;
use warfront_core::{AccountStoreError, ValidationError};

use crate::token::TokenError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum RegisterApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    AccountAlreadyExists(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for RegisterApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match &self {
            RegisterApiError::InvalidInput(message) => {
                tracing::warn!(error = %message, "Account registration failed validation");
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }
            RegisterApiError::AccountAlreadyExists(message) => {
                tracing::warn!(error = %message, "Account registration failed with duplicate");
                (StatusCode::CONFLICT, message.clone())
            }
            RegisterApiError::UnexpectedError(message) => {
                tracing::error!(error = %message, "Account registration failed unexpectedly");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred during registration.".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<ValidationError> for RegisterApiError {
    fn from(error: ValidationError) -> Self {
        RegisterApiError::InvalidInput(error.to_string())
    }
}

impl From<AccountStoreError> for RegisterApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            // The write-time uniqueness check caught a registration that raced
            // past the lookups.
            AccountStoreError::AccountAlreadyExists => {
                RegisterApiError::AccountAlreadyExists(error.to_string())
            }
            AccountStoreError::UnexpectedError(e) => RegisterApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for RegisterApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Duplicate(e) => RegisterApiError::AccountAlreadyExists(e.to_string()),
            RegisterError::Validation(e) => e.into(),
            RegisterError::AccountStore(e) => e.into(),
            RegisterError::Hashing(e) => RegisterApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<TokenError> for RegisterApiError {
    fn from(error: TokenError) -> Self {
        RegisterApiError::UnexpectedError(error.to_string())
    }
}
