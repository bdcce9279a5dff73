use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use staffdir_core::{Envelope, ValidationErrors};

/// Storage layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("employee not found")]
    NotFound,

    #[error("email already in use")]
    DuplicateEmail,

    #[error("corrupt row {0}: {1}")]
    Corrupt(String, String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler error, rendered as a failure envelope.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationErrors),
    BadRequest(String),
    NotFound,
    Conflict(&'static str),
    Internal(String),
}

impl ApiError {
    /// Map a store error, using `conflict` as the duplicate-email message.
    pub fn from_store(err: StoreError, conflict: &'static str) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::DuplicateEmail => ApiError::Conflict(conflict),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::from_store(err, "Employee with this email already exists")
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Envelope::failure("Validation Error").with_errors(errors.messages()),
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, Envelope::failure(message)),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Envelope::failure("Employee not found"),
            ),
            ApiError::Conflict(message) => (StatusCode::BAD_REQUEST, Envelope::failure(message)),
            ApiError::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::failure("Server Error"),
                )
            }
        };
        (status, Json(envelope)).into_response()
    }
}
