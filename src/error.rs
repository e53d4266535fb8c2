// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.
//!
//! Services raise a typed error carrying a fixed user-facing message; this is
//! the single place that decides the HTTP status and response shape, and
//! whether full detail is logged versus masked.

use crate::response::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request body; field errors are attached to the envelope.
    #[error("Invalid request data.")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Too many requests. Please try again later.")]
    TooManyRequests,

    /// A downstream API or the persistence step failed. The message is the
    /// fixed user-facing one; detail has already been logged at the source.
    #[error("{0}")]
    Unavailable(&'static str),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error.")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg, data) = match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Invalid request data.".to_string(),
                serde_json::to_value(errors).unwrap_or(Value::Null),
            ),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, (*msg).to_string(), Value::Null)
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), Value::Null),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), Value::Null),
            AppError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                self.to_string(),
                Value::Null,
            ),
            AppError::Unavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                (*msg).to_string(),
                Value::Null,
            ),
            AppError::Database(detail) => {
                tracing::error!(error = %detail, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                    Value::Null,
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                    Value::Null,
                )
            }
        };

        (status, Json(ApiResponse::error(msg, data))).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_is_masked() {
        let response =
            AppError::Database("connection refused to sqlite:secret.db".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unavailable_keeps_user_facing_message() {
        let err = AppError::Unavailable("Searching for exercises is not available.");
        assert_eq!(
            err.to_string(),
            "Searching for exercises is not available."
        );
    }
}
