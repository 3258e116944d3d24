//! Multipart book uploads
//!
//! Parts are first collected into a plain [`BookUpload`] with no
//! interpretation. [`BookUpload::validate`] then checks every field and
//! reports all failures at once.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart},
};

use crate::models::{BookId, NewBook, ReadingList};
use crate::responses::ValidationErrors;

/// Raw multipart form as the client sent it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpload {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub list: Option<String>,
    pub cover: Option<Bytes>,
}

/// Whether an upload creates a book or replaces one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    Create,
    Update,
}

/// An upload that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    /// Target id; always set for updates
    pub id: Option<BookId>,
    pub book: NewBook,
}

impl BookUpload {
    /// Collect the parts of a multipart request
    ///
    /// Unknown parts are skipped. A part whose body cannot be read fails
    /// with a field error naming it.
    pub async fn from_multipart(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Self, ValidationErrors> {
        let mut multipart = multipart.map_err(|rejection| {
            single_error("body", "INVALID", rejection.body_text())
        })?;

        let mut upload = Self::default();
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return Err(single_error("multipart", "INVALID", e.body_text())),
            };

            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            let slot = match name.as_str() {
                "id" => &mut upload.id,
                "title" => &mut upload.title,
                "subtitle" => &mut upload.subtitle,
                "author" => &mut upload.author,
                "summary" => &mut upload.summary,
                "list" => &mut upload.list,
                "cover" => {
                    let bytes = field.bytes().await.map_err(|e| {
                        single_error("cover", "INVALID", format!("cannot read cover: {}", e.body_text()))
                    })?;
                    upload.cover = (!bytes.is_empty()).then_some(bytes);
                    continue;
                }
                other => {
                    tracing::debug!(part = %other, "ignoring unknown multipart part");
                    continue;
                }
            };

            let text = field.text().await.map_err(|e| {
                single_error(&name, "INVALID", format!("cannot read {}: {}", name, e.body_text()))
            })?;
            *slot = Some(text);
        }

        Ok(upload)
    }

    /// Check every field, collecting all failures
    ///
    /// Blank optional text is stored as absent.
    pub fn validate(&self, mode: UploadMode) -> Result<ValidatedUpload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = non_blank(&self.title);
        if title.is_none() {
            errors.add_field_error("title", "REQUIRED", "title is required");
        }

        let list = match non_blank(&self.list) {
            None => {
                errors.add_field_error("list", "REQUIRED", "list is required");
                None
            }
            Some(raw) => match raw.parse::<ReadingList>() {
                Ok(list) => Some(list),
                Err(e) => {
                    errors.add_field_error("list", "INVALID", e.to_string());
                    None
                }
            },
        };

        let mut id_invalid = false;
        let id = match non_blank(&self.id) {
            None => None,
            Some(raw) => match raw.trim().parse::<BookId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add_field_error("id", "INVALID", format!("id '{}' is not an integer", raw));
                    id_invalid = true;
                    None
                }
            },
        };

        let id = match (mode, id) {
            (UploadMode::Create, _) => None,
            (UploadMode::Update, Some(id)) if id > 0 => Some(id),
            (UploadMode::Update, _) => {
                if !id_invalid {
                    errors.add_field_error("id", "REQUIRED", "a positive id is required to update");
                }
                None
            }
        };

        match (title, list) {
            (Some(title), Some(list)) if !errors.has_errors() => Ok(ValidatedUpload {
                id,
                book: NewBook {
                    title: title.to_string(),
                    subtitle: non_blank(&self.subtitle).map(str::to_string),
                    author: non_blank(&self.author).map(str::to_string),
                    summary: non_blank(&self.summary).map(str::to_string),
                    list,
                    cover: self.cover.clone(),
                },
            }),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn single_error(field: &str, code: &str, message: impl Into<String>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add_field_error(field, code, message);
    errors
}
