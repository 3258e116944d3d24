//! HTTP response builders with correct status codes
//!
//! - **201 Created** with a `Location` header for new books
//! - **204 No Content** for deletes
//! - [`ValidationErrors`], the collector upload validation reports into
//!
//! ```rust
//! use book_catalog::responses::{Created, NoContent, ValidationErrors};
//! use axum::response::IntoResponse;
//! use axum::http::StatusCode;
//!
//! let response = Created::new(serde_json::json!({"id": 1}))
//!     .with_location("/api/v2/books/1")
//!     .into_response();
//! assert_eq!(response.status(), StatusCode::CREATED);
//! assert_eq!(NoContent.into_response().status(), StatusCode::NO_CONTENT);
//!
//! let mut errors = ValidationErrors::new();
//! errors.add_field_error("title", "REQUIRED", "title is required");
//! assert!(errors.has_errors());
//! ```

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::FieldError;

// ============================================================================
// 201 Created
// ============================================================================

/// HTTP 201 Created response
///
/// The body is the created resource as JSON. An optional `Location` header
/// points at the new resource.
#[derive(Debug)]
pub struct Created<T> {
    data: T,
    location: Option<String>,
}

impl<T> Created<T> {
    /// Create a new 201 Created response
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    /// Add a Location header pointing to the created resource
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self.data)).into_response();

        if let Some(location) = self.location {
            if let Ok(header_value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, header_value);
            }
        }

        response
    }
}

// ============================================================================
// 204 No Content
// ============================================================================

/// HTTP 204 No Content response
#[derive(Debug, Clone, Copy)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

// ============================================================================
// Field-level validation failures
// ============================================================================

/// Collects every failing field of one request
///
/// Errors keep the order they were added in. Converting into
/// [`ApiError`](crate::handlers::ApiError) yields a 400 response listing all
/// of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field-level error
    pub fn add_field_error(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        });
    }

    /// Check if there are any validation errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of field errors
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Whether `field` has at least one error
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// `Ok(())` when nothing was collected, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() {
            Err(self)
        } else {
            Ok(())
        }
    }
}

impl From<ValidationErrors> for Vec<FieldError> {
    fn from(errors: ValidationErrors) -> Self {
        errors.errors
    }
}
