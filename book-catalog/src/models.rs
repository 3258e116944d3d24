//! Catalog domain types
//!
//! [`Book`] is the stored record, cover bytes included. [`BookView`] is the
//! shape every representation (JSON, XML, CSV) is built from: it replaces the
//! cover bytes with a link to the cover endpoint.

use std::fmt;
use std::str::FromStr;

use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::versioning::ApiVersion;

/// Identifier assigned to a book by the repository
pub type BookId = i64;

/// Reading list a book belongs to
///
/// Variants are declared in sort order; ordering by `list` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingList {
    /// Books queued for reading
    ToRead,
    /// Books currently being read
    ReadingNow,
    /// Books already finished
    AlreadyRead,
}

impl ReadingList {
    /// Every list, in declaration order
    pub const ALL: [ReadingList; 3] = [Self::ToRead, Self::ReadingNow, Self::AlreadyRead];

    /// Wire name of the list (e.g. `"reading-now"`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ToRead => "to-read",
            Self::ReadingNow => "reading-now",
            Self::AlreadyRead => "already-read",
        }
    }
}

impl fmt::Display for ReadingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known reading list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reading list '{0}' (expected one of: to-read, reading-now, already-read)")]
pub struct UnknownReadingList(pub String);

impl FromStr for ReadingList {
    type Err = UnknownReadingList;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|list| list.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownReadingList(s.to_string()))
    }
}

/// A stored book record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub list: ReadingList,
    pub cover: Option<Bytes>,
}

impl Book {
    /// Build a record from creation data and the id the repository assigned
    pub fn from_new(id: BookId, data: NewBook) -> Self {
        Self {
            id,
            title: data.title,
            subtitle: data.subtitle,
            author: data.author,
            summary: data.summary,
            list: data.list,
            cover: data.cover,
        }
    }
}

/// Data needed to create a book; the repository assigns the id
///
/// Deserializable so seed files can be written as plain JSON arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub list: ReadingList,
    #[serde(skip)]
    pub cover: Option<Bytes>,
}

impl NewBook {
    /// Create book data with only the required fields set
    pub fn new(title: impl Into<String>, list: ReadingList) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            author: None,
            summary: None,
            list,
            cover: None,
        }
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
    pub fn with_cover(mut self, cover: impl Into<Bytes>) -> Self {
        self.cover = Some(cover.into());
        self
    }
}

/// Public representation of a book
///
/// Field names are stable across formats; absent optional fields are
/// omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub id: BookId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub list: ReadingList,
    /// Link to the cover image endpoint
    pub cover: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            subtitle: book.subtitle.clone(),
            author: book.author.clone(),
            summary: book.summary.clone(),
            list: book.list,
            cover: cover_path(ApiVersion::LATEST, book.id),
        }
    }
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self {
            cover: cover_path(ApiVersion::LATEST, book.id),
            id: book.id,
            title: book.title,
            subtitle: book.subtitle,
            author: book.author,
            summary: book.summary,
            list: book.list,
        }
    }
}

/// All books on one reading list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListView {
    pub list: ReadingList,
    pub books: Vec<BookView>,
}

/// Path of a single book resource
pub fn book_path(version: ApiVersion, id: BookId) -> String {
    format!("{}/books/{}", version.base_path(), id)
}

/// Path of a book's cover image
pub fn cover_path(version: ApiVersion, id: BookId) -> String {
    format!("{}/books/covers/{}", version.base_path(), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_list_parse() {
        assert_eq!("to-read".parse::<ReadingList>(), Ok(ReadingList::ToRead));
        assert_eq!(" Reading-Now ".parse::<ReadingList>(), Ok(ReadingList::ReadingNow));
        assert_eq!("already-read".parse::<ReadingList>(), Ok(ReadingList::AlreadyRead));
        assert_eq!(
            "finished".parse::<ReadingList>(),
            Err(UnknownReadingList("finished".to_string()))
        );
    }

    #[test]
    fn test_reading_list_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ReadingList::ReadingNow).unwrap();
        assert_eq!(json, "\"reading-now\"");
        for list in ReadingList::ALL {
            let quoted = format!("\"{}\"", list);
            assert_eq!(serde_json::from_str::<ReadingList>(&quoted).unwrap(), list);
        }
    }

    #[test]
    fn test_reading_list_order_follows_declaration() {
        assert!(ReadingList::ToRead < ReadingList::ReadingNow);
        assert!(ReadingList::ReadingNow < ReadingList::AlreadyRead);
    }

    #[test]
    fn test_view_links_cover_and_drops_bytes() {
        let book = Book::from_new(
            7,
            NewBook::new("Dune", ReadingList::ToRead).with_cover(vec![1u8, 2, 3]),
        );
        let view = BookView::from(&book);
        assert_eq!(view.cover, "/api/v2/books/covers/7");
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("subtitle").is_none());
        assert_eq!(json["list"], "to-read");
    }

    #[test]
    fn test_new_book_deserializes_without_optional_fields() {
        let book: NewBook =
            serde_json::from_str(r#"{"title":"Emma","list":"already-read"}"#).unwrap();
        assert_eq!(book, NewBook::new("Emma", ReadingList::AlreadyRead));
    }
}
