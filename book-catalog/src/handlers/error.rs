//! API error types for handler operations
//!
//! Component errors convert into [`ApiError`] with `From`; only this module
//! decides which status code and body a failure becomes.
//!
//! # Example
//!
//! ```rust
//! use book_catalog::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found("Book", "42");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.entity_id, Some("42".to_string()));
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::catalog::InvalidOrderField;
use crate::error::{ErrorResponse, FieldError};
use crate::representation::{EncodeError, NotAcceptable, RepresentationError};
use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
use crate::responses::ValidationErrors;

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing a page of books
    List,
    /// Getting a single book by ID
    Get,
    /// Getting a book's cover image
    Cover,
    /// Creating a new book
    Create,
    /// Updating an existing book
    Update,
    /// Deleting a book
    Delete,
    /// Listing the books on one reading list
    ReadingList,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Cover => write!(f, "cover"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::ReadingList => write!(f, "reading_list"),
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Book was not found
    NotFound,
    /// Request input failed validation
    ValidationFailed,
    /// No acceptable representation exists
    NotAcceptable,
    /// `orderBy` names a field outside the allow-list
    InvalidOrderField,
    /// Internal server error
    InternalError,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::NotAcceptable => write!(f, "not_acceptable"),
            Self::InvalidOrderField => write!(f, "invalid_order_field"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed | Self::InvalidOrderField => StatusCode::BAD_REQUEST,
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error kind
    #[must_use]
    pub fn error_code(&self) -> String {
        format!("{}", self).to_uppercase()
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Book")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
    /// Every failing input field, for validation errors
    pub field_errors: Vec<FieldError>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
            field_errors: Vec::new(),
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::NotFound, "Entity not found")
            .with_entity(entity_type, entity_id)
    }

    /// Create a validation error listing every failing field
    ///
    /// ```rust
    /// use book_catalog::handlers::{ApiError, ApiErrorKind};
    /// use book_catalog::responses::ValidationErrors;
    ///
    /// let mut errors = ValidationErrors::new();
    /// errors.add_field_error("title", "REQUIRED", "title is required");
    /// let error = ApiError::validation_failed(errors);
    /// assert_eq!(error.kind.status_code().as_u16(), 400);
    /// assert_eq!(error.field_errors[0].field, "title");
    /// ```
    pub fn validation_failed(errors: ValidationErrors) -> Self {
        let mut error = Self::new(
            ApiOperation::Create,
            ApiErrorKind::ValidationFailed,
            "Validation failed",
        );
        error.field_errors = errors.into();
        error
    }

    /// Create an internal error; the message is logged but never sent
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::InternalError, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Message safe to return to the client
    fn public_message(&self) -> String {
        match self.kind {
            ApiErrorKind::InternalError => INTERNAL_MESSAGE.to_string(),
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(ref entity_type), Some(ref entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                "API error: {}", self.message
            );
        } else {
            tracing::debug!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                field_errors = self.field_errors.len(),
                "request rejected: {}", self.message
            );
        }

        let body = ErrorResponse::with_code(status, self.kind.error_code(), self.public_message())
            .with_field_errors(self.field_errors);

        (status, Json(body)).into_response()
    }
}

/// `map_err` adapter converting a component error and tagging it with `operation`
pub(crate) fn during<E: Into<ApiError>>(operation: ApiOperation) -> impl Fn(E) -> ApiError {
    move |err| err.into().with_operation(operation)
}

/// Convert RepositoryOperation to ApiOperation
fn repository_operation_to_api_operation(op: RepositoryOperation) -> ApiOperation {
    match op {
        RepositoryOperation::FindAll => ApiOperation::List,
        RepositoryOperation::FindById => ApiOperation::Get,
        RepositoryOperation::Create => ApiOperation::Create,
        RepositoryOperation::Update => ApiOperation::Update,
        RepositoryOperation::Delete => ApiOperation::Delete,
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = repository_operation_to_api_operation(err.operation);

        let mut error = match err.kind {
            RepositoryErrorKind::NotFound => {
                Self::new(operation, ApiErrorKind::NotFound, err.message)
            }
            RepositoryErrorKind::ValidationFailed => {
                let mut errors = ValidationErrors::new();
                errors.add_field_error("book", "INVALID", err.message.clone());
                Self::validation_failed(errors).with_operation(operation)
            }
            RepositoryErrorKind::Unavailable | RepositoryErrorKind::Other => {
                Self::new(operation, ApiErrorKind::InternalError, err.to_string())
            }
        };

        error.entity_type = err.entity_type;
        error.entity_id = err.entity_id;
        error
    }
}

impl From<InvalidOrderField> for ApiError {
    fn from(err: InvalidOrderField) -> Self {
        let message = err.to_string();
        let mut error = Self::new(ApiOperation::List, ApiErrorKind::InvalidOrderField, message.clone());
        error.field_errors.push(FieldError {
            field: "orderBy".to_string(),
            code: "INVALID_ORDER_FIELD".to_string(),
            message,
        });
        error
    }
}

impl From<NotAcceptable> for ApiError {
    fn from(err: NotAcceptable) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::NotAcceptable, err.to_string())
    }
}

impl From<EncodeError> for ApiError {
    fn from(err: EncodeError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<RepresentationError> for ApiError {
    fn from(err: RepresentationError) -> Self {
        match err {
            RepresentationError::NotAcceptable(err) => err.into(),
            RepresentationError::Encode(err) => err.into(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation_failed(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::Format;

    async fn body_of(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_api_operation_display() {
        assert_eq!(format!("{}", ApiOperation::List), "list");
        assert_eq!(format!("{}", ApiOperation::Cover), "cover");
        assert_eq!(format!("{}", ApiOperation::ReadingList), "reading_list");
    }

    #[test]
    fn test_api_error_kind_status_codes() {
        assert_eq!(ApiErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiErrorKind::ValidationFailed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::InvalidOrderField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::NotAcceptable.status_code(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(
            ApiErrorKind::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiErrorKind::ValidationFailed.error_code(), "VALIDATION_FAILED");
        assert_eq!(ApiErrorKind::InvalidOrderField.error_code(), "INVALID_ORDER_FIELD");
    }

    #[test]
    fn test_display_with_entity() {
        let error = ApiError::not_found("Book", "7");
        assert_eq!(
            error.to_string(),
            "API not_found error during get: Entity not found [Book: 7]"
        );
    }

    #[test]
    fn test_from_repository_not_found() {
        let repo_err = RepositoryError::not_found(RepositoryOperation::Delete, "Book", "9");
        let error = ApiError::from(repo_err);
        assert_eq!(error.kind, ApiErrorKind::NotFound);
        assert_eq!(error.operation, ApiOperation::Delete);
        assert_eq!(error.entity_id.as_deref(), Some("9"));
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let repo_err = RepositoryError::unavailable(RepositoryOperation::FindAll, "socket at 10.0.0.3 refused");
        let (status, body) = body_of(repo_err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, INTERNAL_MESSAGE);
        assert!(body.errors.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_order_field_body() {
        let (status, body) = body_of(InvalidOrderField("cover".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code.as_deref(), Some("INVALID_ORDER_FIELD"));
        assert_eq!(body.errors[0].field, "orderBy");
    }

    #[tokio::test]
    async fn test_validation_body_lists_all_fields() {
        let mut errors = ValidationErrors::new();
        errors.add_field_error("title", "REQUIRED", "title is required");
        errors.add_field_error("list", "INVALID", "unknown list");
        let (status, body) = body_of(errors.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status, 400);
        assert_eq!(body.code.as_deref(), Some("VALIDATION_FAILED"));
        let fields: Vec<_> = body.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["title", "list"]);
    }

    #[tokio::test]
    async fn test_representation_errors() {
        let not_acceptable = RepresentationError::NotAcceptable(NotAcceptable {
            requested: "text/html".into(),
        });
        let (status, _) = body_of(not_acceptable.into()).await;
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);

        let encode = RepresentationError::Encode(EncodeError::new(Format::Xml, "boom"));
        let (status, body) = body_of(encode.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, INTERNAL_MESSAGE);
    }
}
