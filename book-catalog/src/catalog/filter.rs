//! Filter predicates over book records
//!
//! A [`BookFilter`] holds the optional per-field constraints a caller sent.
//! [`BookFilter::build`] turns it into a [`Predicate`]: one clause per
//! populated field, combined with AND. Text clauses are case-insensitive
//! substring tests; the list clause is an exact match.
//!
//! # Example
//!
//! ```rust
//! use book_catalog::catalog::BookFilter;
//! use book_catalog::models::{Book, NewBook, ReadingList};
//!
//! let filter = BookFilter::default().with_author("tolkien");
//! let predicate = filter.build();
//!
//! let book = Book::from_new(1, NewBook::new("The Hobbit", ReadingList::ToRead)
//!     .with_author("J. R. R. Tolkien"));
//! assert!(predicate.matches(&book));
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Book, ReadingList};

/// Optional per-field constraints; absent or blank fields impose none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    /// Author contains (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Title contains (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Subtitle contains (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// List equals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ReadingList>,
}

impl BookFilter {
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_list(mut self, list: ReadingList) -> Self {
        self.list = Some(list);
        self
    }

    /// Build the predicate for this filter
    ///
    /// Never fails; a filter with no populated field yields a predicate
    /// that accepts every record.
    pub fn build(&self) -> Predicate {
        let text_clauses = [
            (TextField::Author, &self.author),
            (TextField::Title, &self.title),
            (TextField::Subtitle, &self.subtitle),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            let needle = value.as_deref()?.trim();
            (!needle.is_empty()).then(|| Clause::Contains {
                field,
                needle: needle.to_lowercase(),
            })
        });

        let clauses = text_clauses
            .chain(self.list.map(Clause::ListIs))
            .collect();

        Predicate { clauses }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Author,
    Title,
    Subtitle,
}

impl TextField {
    fn value<'a>(&self, book: &'a Book) -> Option<&'a str> {
        match self {
            Self::Author => book.author.as_deref(),
            Self::Title => Some(book.title.as_str()),
            Self::Subtitle => book.subtitle.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Clause {
    /// `needle` is stored lowercased
    Contains { field: TextField, needle: String },
    ListIs(ReadingList),
}

impl Clause {
    fn matches(&self, book: &Book) -> bool {
        match self {
            Self::Contains { field, needle } => field
                .value(book)
                .is_some_and(|value| value.to_lowercase().contains(needle.as_str())),
            Self::ListIs(list) => book.list == *list,
        }
    }
}

/// Conjunction of field tests built from a [`BookFilter`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// Whether `book` passes every clause
    pub fn matches(&self, book: &Book) -> bool {
        self.clauses.iter().all(|clause| clause.matches(book))
    }

    /// Whether this predicate imposes no constraint
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }
}
