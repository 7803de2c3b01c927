//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::{PasswordError, TokenError};
use crate::domain::DomainError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Bad credentials")]
    AuthenticationFailed,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(e) => AppError::Domain(e),
            StoreError::Duplicate(field) => AppError::Conflict(field.conflict_message().to_string()),
            StoreError::InvalidData(msg) => AppError::Internal(msg),
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encode(e) => AppError::Internal(format!("token creation failed: {e}")),
            TokenError::Lifetime(secs) => {
                AppError::Internal(format!("token lifetime {secs}s out of range"))
            }
            TokenError::Invalid(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                AppError::InvalidToken
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            // 400 Bad Request
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),

            // 401 Unauthorized
            AppError::AuthenticationFailed => (StatusCode::UNAUTHORIZED, "authentication_failed"),
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),

            AppError::Domain(domain_err) => match domain_err {
                DomainError::TransactionNotFound(_) => {
                    (StatusCode::NOT_FOUND, "transaction_not_found")
                }
                DomainError::NotOwner { .. } => (StatusCode::FORBIDDEN, "not_owner"),
                DomainError::InvalidField { .. } => (StatusCode::BAD_REQUEST, "invalid_field"),
            },

            // 500 Internal Server Error
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let details = match &self {
            AppError::Domain(e) => Some(e.to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                None
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                None
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                None
            }
            _ => None,
        };

        // Server-side detail stays in the logs
        let error = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
