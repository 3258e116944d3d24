//! Client error type

use book_catalog::error::ErrorResponse;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for client calls
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures of a catalog call
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// A local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Status code of a [`ClientError::Status`]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            Self::Io(_) => None,
        }
    }

    /// The server's JSON error body, when it sent one
    pub fn error_response(&self) -> Option<ErrorResponse> {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body).ok(),
            Self::Http(_) | Self::Io(_) => None,
        }
    }
}
