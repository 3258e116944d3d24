//! Page windows over ordered record sequences
//!
//! # Example
//!
//! ```rust
//! use book_catalog::catalog::{paginate, PageRequest};
//!
//! let page = paginate(1..=25, &PageRequest::new(3, 10));
//! assert_eq!(page.results, vec![21, 22, 23, 24, 25]);
//! assert_eq!(page.total, 25);
//! assert_eq!(page.total_pages, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Page size used when the request does not name a usable one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Requested page window
///
/// Both values are optional. Unset, zero or negative values fall back to
/// page 1 and the paginator's default size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl PageRequest {
    /// Request page `page` of `page_size` records
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Effective 1-based page number
    #[must_use]
    pub fn page_number(&self) -> u32 {
        positive(self.page).unwrap_or(1)
    }

    /// Effective page size, using `default` when unset or non-positive
    #[must_use]
    pub fn page_size_or(&self, default: u32) -> u32 {
        positive(self.page_size).unwrap_or(default.max(1))
    }
}

fn positive(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// One window of an ordered sequence plus page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records matching the query, before paging
    pub total: u64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Records per page
    pub page_size: u32,
    /// `ceil(total / page_size)`; 0 when there are no records
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    /// Records in this window
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Map each record in the window, keeping the metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Applies page windows with a configured default page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    default_page_size: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(default_page_size: u32) -> Self {
        Self {
            default_page_size: default_page_size.max(1),
        }
    }

    /// Cut the requested window out of `items`
    ///
    /// `items` is iterated exactly once: the total is counted in the same
    /// pass that collects the window. A page past the end yields no records
    /// but still reports the true total.
    pub fn paginate<I>(&self, items: I, request: &PageRequest) -> Page<I::Item>
    where
        I: IntoIterator,
    {
        let page = request.page_number();
        let page_size = request.page_size_or(self.default_page_size);

        let start = u64::from(page - 1).saturating_mul(u64::from(page_size));
        let end = start.saturating_add(u64::from(page_size));

        let mut total = 0u64;
        let mut results = Vec::new();
        for item in items {
            if (start..end).contains(&total) {
                results.push(item);
            }
            total += 1;
        }

        let total_pages = calculate_total_pages(total, page_size);
        Page {
            total,
            page,
            page_size,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
            results,
        }
    }
}

/// Paginate with [`DEFAULT_PAGE_SIZE`]
pub fn paginate<I>(items: I, request: &PageRequest) -> Page<I::Item>
where
    I: IntoIterator,
{
    Paginator::default().paginate(items, request)
}

/// Calculate total pages, rounding up
fn calculate_total_pages(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    pages.min(u64::from(u32::MAX)) as u32
}
