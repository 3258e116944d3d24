//! Allow-listed ordering of book records
//!
//! Callers name a sort field as a string. The name is mapped onto
//! [`SortField`] before any record is touched; names outside the allow-list
//! fail with [`InvalidOrderField`]. Sorting is ascending and stable.
//!
//! # Example
//!
//! ```rust
//! use book_catalog::catalog::{OrderSpec, SortField};
//!
//! let order = OrderSpec::by("Title").build().unwrap();
//! assert_eq!(order.field(), Some(SortField::Title));
//!
//! assert!(OrderSpec::by("title; drop table books").build().is_err());
//! assert!(OrderSpec::default().build().unwrap().is_identity());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Book, ReadingList};

/// Sort key requested by name but not on the allow-list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot order by '{0}' (allowed fields: author, title, subtitle, list)")]
pub struct InvalidOrderField(pub String);

/// Fields a caller may order by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Author,
    Title,
    Subtitle,
    List,
}

impl SortField {
    /// The allow-list
    pub const ALLOWED: [SortField; 4] = [Self::Author, Self::Title, Self::Subtitle, Self::List];

    /// Field name as accepted in `orderBy`
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::List => "list",
        }
    }

    fn key(&self, book: &Book) -> SortKey {
        match self {
            Self::Author => SortKey::text(book.author.as_deref()),
            Self::Title => SortKey::text(Some(&book.title)),
            Self::Subtitle => SortKey::text(book.subtitle.as_deref()),
            Self::List => SortKey::List(book.list),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortField {
    type Err = InvalidOrderField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALLOWED
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InvalidOrderField(s.to_string()))
    }
}

/// Comparable key extracted once per record
///
/// Absent text sorts before present text; text compares case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(Option<String>),
    List(ReadingList),
}

impl SortKey {
    fn text(value: Option<&str>) -> Self {
        Self::Text(value.map(str::to_lowercase))
    }
}

/// Untrusted ordering request as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    #[serde(default, rename = "orderBy", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

impl OrderSpec {
    /// Request ordering by `field`
    pub fn by(field: impl Into<String>) -> Self {
        Self {
            order_by: Some(field.into()),
        }
    }

    /// Validate the requested field against the allow-list
    ///
    /// An absent or blank field yields the identity ordering.
    pub fn build(&self) -> Result<BookOrder, InvalidOrderField> {
        match self.order_by.as_deref().map(str::trim) {
            None | Some("") => Ok(BookOrder::identity()),
            Some(name) => name.parse().map(BookOrder::by),
        }
    }
}

/// A validated ordering of book records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookOrder {
    field: Option<SortField>,
}

impl BookOrder {
    /// Keep source order
    pub const fn identity() -> Self {
        Self { field: None }
    }

    /// Ascending order on `field`
    pub const fn by(field: SortField) -> Self {
        Self { field: Some(field) }
    }

    pub fn field(&self) -> Option<SortField> {
        self.field
    }

    pub fn is_identity(&self) -> bool {
        self.field.is_none()
    }

    /// Sort `books` in place; equal keys keep their relative order
    pub fn apply(&self, books: &mut [Book]) {
        if let Some(field) = self.field {
            books.sort_by_cached_key(|book| field.key(book));
        }
    }
}
