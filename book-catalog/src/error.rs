//! Service-level error type and the JSON error body shared by all endpoints

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using the service [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring and running the service
///
/// Request-level failures use [`crate::handlers::ApiError`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Configuration loaded but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

/// A single failing input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as the client sent it
    pub field: String,
    /// Machine-readable reason (e.g. `REQUIRED`, `INVALID`)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,

    /// Field-level failures, present for validation errors only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            status: status.as_u16(),
            errors: Vec::new(),
        }
    }

    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
            errors: Vec::new(),
        }
    }

    /// Attach field-level failures
    #[must_use]
    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new(StatusCode::NOT_FOUND, "Book not found");
        assert_eq!(err.status, 404);
        assert_eq!(err.error, "Book not found");
        assert!(err.code.is_none());
    }

    #[test]
    fn test_error_response_with_code() {
        let err = ErrorResponse::with_code(StatusCode::NOT_ACCEPTABLE, "NOT_ACCEPTABLE", "nope");
        assert_eq!(err.status, 406);
        assert_eq!(err.code, Some("NOT_ACCEPTABLE".to_string()));
    }

    #[test]
    fn test_field_errors_omitted_when_empty() {
        let err = ErrorResponse::with_code(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "boom");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("errors").is_none());

        let err = err.with_field_errors(vec![FieldError {
            field: "title".to_string(),
            code: "REQUIRED".to_string(),
            message: "title is required".to_string(),
        }]);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["errors"][0]["field"], "title");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Error = figment::Error::from("missing field".to_string()).into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
