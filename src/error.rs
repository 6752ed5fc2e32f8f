// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required fields: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Password did not match the stored password")]
    InvalidCredentials,

    #[error("Missing or invalid authentication token")]
    Unauthorized,

    #[error("Token has already expired and cannot be extended")]
    TokenExpired,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Maximum number of checks reached ({0})")]
    QuotaExceeded(usize),

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    /// Default mapping for store failures propagated with `?`.
    ///
    /// Handlers that want a more specific message (e.g. "user already
    /// exists") map the store error themselves before it reaches here.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists => AppError::Conflict("Record already exists".to_string()),
            StoreError::NotFound => AppError::NotFound("Record not found".to_string()),
            other => AppError::Storage(other),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredentials
            | AppError::TokenExpired
            | AppError::QuotaExceeded(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthorized => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal storage error".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse { error: message };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
