//! Query string of the book list endpoint
//!
//! Every parameter arrives as text so that a malformed value becomes a field
//! error in the response body rather than a bare extractor rejection.
//!
//! # Example
//!
//! ```rust
//! use book_catalog::handlers::ListQuery;
//! use book_catalog::catalog::SortField;
//!
//! let query = ListQuery::new()
//!     .with_author("tolkien")
//!     .with_order_by("title")
//!     .with_page(2)
//!     .with_page_size(5);
//!
//! let parsed = query.to_catalog_query().unwrap();
//! assert_eq!(parsed.page.page_number(), 2);
//! assert_eq!(parsed.order.build().unwrap().field(), Some(SortField::Title));
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{BookFilter, CatalogQuery, OrderSpec, PageRequest};
use crate::models::ReadingList;
use crate::responses::ValidationErrors;

/// Query parameters for `GET /books`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Author contains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Title contains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Subtitle contains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Reading list equals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,

    /// Field name to sort by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Page number (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// Records per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

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
        self.list = Some(list.to_string());
        self
    }

    #[must_use]
    pub fn with_order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page.to_string());
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size.to_string());
        self
    }

    /// Parse into a [`CatalogQuery`], reporting every malformed parameter
    ///
    /// `orderBy` is carried through unchecked; the order builder validates it.
    pub fn to_catalog_query(&self) -> Result<CatalogQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let list = match blank_to_none(&self.list) {
            None => None,
            Some(raw) => match raw.parse::<ReadingList>() {
                Ok(list) => Some(list),
                Err(e) => {
                    errors.add_field_error("list", "INVALID", e.to_string());
                    None
                }
            },
        };

        let page = parse_number(&mut errors, "page", &self.page);
        let page_size = parse_number(&mut errors, "pageSize", &self.page_size);

        errors.into_result()?;

        Ok(CatalogQuery {
            filter: BookFilter {
                author: self.author.clone(),
                title: self.title.clone(),
                subtitle: self.subtitle.clone(),
                list,
            },
            order: OrderSpec {
                order_by: self.order_by.clone(),
            },
            page: PageRequest { page, page_size },
        })
    }
}

fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(errors: &mut ValidationErrors, field: &str, value: &Option<String>) -> Option<i64> {
    let raw = blank_to_none(value)?;
    match raw.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add_field_error(field, "INVALID", format!("{} '{}' is not an integer", field, raw));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_unconstrained() {
        let query = ListQuery::new().to_catalog_query().unwrap();
        assert_eq!(query, CatalogQuery::default());
        assert!(query.filter.build().is_unconstrained());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let query: ListQuery =
            serde_json::from_str(r#"{"orderBy":"author","pageSize":"25","list":"to-read"}"#).unwrap();
        assert_eq!(query.order_by.as_deref(), Some("author"));

        let parsed = query.to_catalog_query().unwrap();
        assert_eq!(parsed.page.page_size, Some(25));
        assert_eq!(parsed.filter.list, Some(ReadingList::ToRead));
    }

    #[test]
    fn test_blank_numbers_use_defaults() {
        let query = ListQuery {
            page: Some(" ".into()),
            page_size: Some(String::new()),
            ..Default::default()
        };
        let parsed = query.to_catalog_query().unwrap();
        assert_eq!(parsed.page, PageRequest::default());
    }

    #[test]
    fn test_malformed_values_are_all_reported() {
        let query = ListQuery {
            list: Some("someday".into()),
            page: Some("two".into()),
            page_size: Some("1.5".into()),
            ..Default::default()
        };
        let errors = query.to_catalog_query().unwrap_err();
        let fields: Vec<_> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["list", "page", "pageSize"]);
    }

    #[test]
    fn test_order_by_is_not_validated_here() {
        let parsed = ListQuery::new().with_order_by("cover").to_catalog_query().unwrap();
        assert!(parsed.order.build().is_err());
    }
}
