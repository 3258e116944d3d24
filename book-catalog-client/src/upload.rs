//! Multipart encoding of book uploads
//!
//! [`BookUpload::encode`] decides which parts a request carries;
//! [`MultipartBody::into_form`] turns them into a `reqwest` form. The split
//! keeps part selection testable without a server.

use std::path::Path;

use book_catalog::models::{BookId, ReadingList};
use reqwest::multipart::{Form, Part};

use crate::error::Result;

/// File name sent with the cover part
pub const COVER_FILE_NAME: &str = "cover.png";

/// Content type sent with the cover part
pub const COVER_CONTENT_TYPE: &str = "image/png";

/// A book as the client submits it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookUpload {
    /// Target of an update; 0 for a new book
    pub id: BookId,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub list: ReadingList,
    /// Raw image bytes
    pub cover: Option<Vec<u8>>,
}

impl BookUpload {
    pub fn new(title: impl Into<String>, list: ReadingList) -> Self {
        Self {
            id: 0,
            title: title.into(),
            subtitle: None,
            author: None,
            summary: None,
            list,
            cover: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<Vec<u8>>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Read the cover from an image file
    pub async fn with_cover_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(self.with_cover(bytes))
    }

    /// Select the parts this upload sends
    ///
    /// `title` and `list` always go out. Optional text goes out only when
    /// non-empty, `id` only when positive.
    pub fn encode(&self) -> MultipartBody {
        let mut parts = vec![
            UploadPart::text("title", self.title.clone()),
            UploadPart::text("list", self.list.to_string()),
        ];

        for (name, value) in [
            ("subtitle", &self.subtitle),
            ("summary", &self.summary),
            ("author", &self.author),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                parts.push(UploadPart::text(name, value));
            }
        }

        if self.id > 0 {
            parts.push(UploadPart::text("id", self.id.to_string()));
        }

        if let Some(cover) = &self.cover {
            parts.push(UploadPart {
                name: "cover",
                content: PartContent::File {
                    file_name: COVER_FILE_NAME,
                    content_type: COVER_CONTENT_TYPE,
                    bytes: cover.clone(),
                },
            });
        }

        MultipartBody { parts }
    }
}

/// One named part of an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub name: &'static str,
    pub content: PartContent,
}

impl UploadPart {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            content: PartContent::Text(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartContent {
    Text(String),
    File {
        file_name: &'static str,
        content_type: &'static str,
        bytes: Vec<u8>,
    },
}

/// The ordered parts of an encoded upload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartBody {
    parts: Vec<UploadPart>,
}

impl MultipartBody {
    pub fn parts(&self) -> &[UploadPart] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&UploadPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Part names in send order
    pub fn names(&self) -> Vec<&'static str> {
        self.parts.iter().map(|part| part.name).collect()
    }

    /// Build the `reqwest` form
    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for UploadPart { name, content } in self.parts {
            form = match content {
                PartContent::Text(value) => form.text(name, value),
                PartContent::File {
                    file_name,
                    content_type,
                    bytes,
                } => form.part(
                    name,
                    Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(content_type)?,
                ),
            };
        }
        Ok(form)
    }
}
