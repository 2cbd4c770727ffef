//! Custom error types for the haptic-pattern-server.
//!
//! This module provides a centralized error handling system using the `thiserror` crate
//! to define structured, typed errors with clear messages and proper error conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;
use std::io;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::haptic::{CompileError, PreferenceError};

/// Message returned to callers for every internal failure.
const INTERNAL_ERROR_MESSAGE: &str =
    "Failed to process haptic translation. Please try again later.";

/// Primary error type for the application, covering all possible error cases.
#[derive(Debug, Error)]
pub enum AppError {
    /// The text field was absent or blank.
    #[error("Text field is required")]
    MissingText,

    /// A preference lies outside of its valid range.
    #[error("Invalid preference: {0}")]
    InvalidPreference(#[from] PreferenceError),

    /// The text compiled to nothing.
    #[error("Invalid input: {0}")]
    Compile(#[from] CompileError),

    /// The request body could not be parsed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Errors from invalid configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors from the underlying IO system.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unexpected failure. Details are only logged, under `correlation_id`.
    #[error("Internal server error (correlation id {correlation_id})")]
    Internal { correlation_id: Uuid },
}

impl AppError {
    /// Log `cause` under a fresh correlation id and return an opaque internal error.
    pub fn internal(cause: impl Display) -> Self {
        let correlation_id = Uuid::new_v4();
        error!(%correlation_id, "Internal error: {}", cause);
        AppError::Internal { correlation_id }
    }

    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::MissingText
                | AppError::InvalidPreference(_)
                | AppError::Compile(_)
                | AppError::InvalidRequest(_)
        )
    }

    /// HTTP status class for this error.
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Implementation to convert AppError into an HTTP response for Axum.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Internal { correlation_id } => json!({
                "error": INTERNAL_ERROR_MESSAGE,
                "correlationId": correlation_id.to_string(),
            }),
            _ if self.is_client_error() => json!({ "error": self.to_string() }),
            // Configuration and IO errors never carry details to the caller.
            _ => json!({ "error": INTERNAL_ERROR_MESSAGE }),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for Results with AppError.
pub type Result<T> = std::result::Result<T, AppError>;

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Add context to the error.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::internal(format!("{}: {}", f(), e)))
    }
}
