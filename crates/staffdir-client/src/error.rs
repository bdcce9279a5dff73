//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a directory API call, normalized from the response envelope.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Field-level violations (400 with an `errors` list)
    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },

    /// Duplicate email or another rejected write (400 without field errors)
    #[error("{0}")]
    Conflict(String),

    /// Identifier does not resolve (404)
    #[error("{0}")]
    NotFound(String),

    /// Any other server-side failure
    #[error("{0}")]
    Unexpected(String),

    /// Request never produced a response
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request could not be built, e.g. an empty id
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Classify a failed envelope by its HTTP status.
    pub fn from_status(
        status: StatusCode,
        message: Option<String>,
        errors: Option<Vec<String>>,
    ) -> Self {
        let message = message.unwrap_or_else(|| format!("HTTP error: {}", status));
        match status {
            StatusCode::BAD_REQUEST => match errors {
                Some(errors) if !errors.is_empty() => ClientError::Validation { message, errors },
                _ => ClientError::Conflict(message),
            },
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Unexpected(message),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Text to show in a notification: field violations joined, else the message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation { errors, .. } if !errors.is_empty() => errors.join(", "),
            other => other.to_string(),
        }
    }
}
