//! Error handling for the shelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shelf_db::StoreError;
use thiserror::Error;

use crate::envelope::Envelope;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or empty.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The request could not be parsed (path segment, JSON body).
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// The path exists but not for this HTTP method.
    #[error("method not allowed: {message}")]
    MethodNotAllowed { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            message: message.into(),
        }
    }

    /// Map a storage failure, using `not_found` as the client message when
    /// the keyed row is missing.
    pub fn from_store(err: StoreError, not_found: &str) -> Self {
        match err {
            StoreError::NotFound => Self::not_found(not_found),
            other => Self::from(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::BadRequest { .. } => "bad_request",
            AppError::NotFound { .. } => "not_found",
            AppError::MethodNotAllowed { .. } => "method_not_allowed",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::not_found("record not found"),
            StoreError::Database(e) => Self::Internal(anyhow::Error::new(e)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            AppError::Validation { message }
            | AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::MethodNotAllowed { message } => message,
            AppError::Internal(e) => format!("{e:#}"),
        };

        if status.is_server_error() {
            tracing::error!(
                error_code = code,
                status_code = status.as_u16(),
                error = %message,
                "request failed"
            );
        } else {
            tracing::warn!(
                error_code = code,
                status_code = status.as_u16(),
                error = %message,
                "request rejected"
            );
        }

        (status, Json(Envelope::failure(message))).into_response()
    }
}
