//! Query pipeline for the book collection
//!
//! A list request runs strictly in sequence:
//!
//! 1. [`BookFilter::build`] produces a [`Predicate`]
//! 2. [`OrderSpec::build`] validates the sort field into a [`BookOrder`]
//! 3. [`Paginator::paginate`] cuts the requested window
//!
//! [`CatalogQuery::prepare`] performs every fallible step up front, so a bad
//! sort field is rejected before the repository is read.

mod filter;
mod order;
mod paging;

pub use filter::{BookFilter, Predicate};
pub use order::{BookOrder, InvalidOrderField, OrderSpec, SortField};
pub use paging::{paginate, Page, PageRequest, Paginator, DEFAULT_PAGE_SIZE};

use crate::models::Book;

/// Filter, order and page parameters of one list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub filter: BookFilter,
    pub order: OrderSpec,
    pub page: PageRequest,
}

impl CatalogQuery {
    /// Validate the query, producing a plan that can no longer fail
    pub fn prepare(&self) -> Result<PreparedQuery, InvalidOrderField> {
        Ok(PreparedQuery {
            predicate: self.filter.build(),
            order: self.order.build()?,
            page: self.page,
        })
    }
}

/// A validated [`CatalogQuery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    predicate: Predicate,
    order: BookOrder,
    page: PageRequest,
}

impl PreparedQuery {
    /// Filter, order and page `books`
    ///
    /// `total` in the result counts the filtered records, not the store.
    pub fn run(&self, books: Vec<Book>, paginator: &Paginator) -> Page<Book> {
        let matching = books.into_iter().filter(|book| self.predicate.matches(book));

        if self.order.is_identity() {
            return paginator.paginate(matching, &self.page);
        }

        let mut ordered: Vec<Book> = matching.collect();
        self.order.apply(&mut ordered);
        paginator.paginate(ordered, &self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBook, ReadingList};

    fn catalog(n: i64) -> Vec<Book> {
        (1..=n)
            .map(|i| {
                let list = if i % 2 == 0 { ReadingList::ToRead } else { ReadingList::AlreadyRead };
                Book::from_new(i, NewBook::new(format!("Book {:02}", n + 1 - i), list))
            })
            .collect()
    }

    #[test]
    fn test_twenty_five_records_third_page() {
        let query = CatalogQuery {
            page: PageRequest::new(3, 10),
            ..Default::default()
        };
        let page = query.prepare().unwrap().run(catalog(25), &Paginator::default());
        let ids: Vec<_> = page.results.iter().map(|b| b.id).collect();
        assert_eq!(ids, [21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_counts_filtered_records() {
        let query = CatalogQuery {
            filter: BookFilter::default().with_list(ReadingList::ToRead),
            page: PageRequest::new(1, 5),
            ..Default::default()
        };
        let page = query.prepare().unwrap().run(catalog(25), &Paginator::default());
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
        assert!(page.results.iter().all(|b| b.list == ReadingList::ToRead));
    }

    #[test]
    fn test_order_applies_before_paging() {
        let query = CatalogQuery {
            order: OrderSpec::by("title"),
            page: PageRequest::new(1, 3),
            ..Default::default()
        };
        let page = query.prepare().unwrap().run(catalog(10), &Paginator::default());
        let titles: Vec<_> = page.results.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Book 01", "Book 02", "Book 03"]);
    }

    #[test]
    fn test_invalid_order_rejected_at_prepare() {
        let query = CatalogQuery {
            order: OrderSpec::by("cover"),
            ..Default::default()
        };
        assert_eq!(query.prepare().unwrap_err(), InvalidOrderField("cover".to_string()));
    }
}
