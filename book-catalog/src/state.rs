//! Application state management

use std::sync::Arc;

use axum::body::Bytes;

use crate::catalog::Paginator;
use crate::representation::PLACEHOLDER_COVER;
use crate::repository::BookRepository;

/// State shared across handlers
///
/// Generic over the repository so tests and alternative stores plug in
/// without boxing.
pub struct AppState<R> {
    repository: Arc<R>,
    placeholder: Bytes,
    paginator: Paginator,
    service_name: Arc<str>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            placeholder: self.placeholder.clone(),
            paginator: self.paginator,
            service_name: Arc::clone(&self.service_name),
        }
    }
}

impl<R: BookRepository> AppState<R> {
    /// State with the built-in placeholder cover and default page size
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            placeholder: Bytes::from_static(PLACEHOLDER_COVER),
            paginator: Paginator::default(),
            service_name: Arc::from(env!("CARGO_PKG_NAME")),
        }
    }

    /// Replace the placeholder cover
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: Bytes) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set the page size used when a request names none
    #[must_use]
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.paginator = Paginator::new(page_size);
        self
    }

    /// Name reported by the health endpoint
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Arc::from(name.into());
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn placeholder(&self) -> &Bytes {
        &self.placeholder
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PageRequest;
    use crate::repository::InMemoryBookRepository;

    #[test]
    fn test_defaults() {
        let state = AppState::new(InMemoryBookRepository::new());
        assert_eq!(&state.placeholder()[..], PLACEHOLDER_COVER);
        let page = state.paginator().paginate(0..30, &PageRequest::default());
        assert_eq!(page.page_size, 10);
        assert_eq!(state.service_name(), "book-catalog");
    }

    #[test]
    fn test_clone_shares_repository() {
        let state = AppState::new(InMemoryBookRepository::new())
            .with_placeholder(Bytes::from_static(b"GIF89a"))
            .with_default_page_size(4);
        let clone = state.clone();
        assert!(std::ptr::eq(state.repository(), clone.repository()));
        assert_eq!(clone.placeholder(), &Bytes::from_static(b"GIF89a"));
        assert_eq!(clone.paginator(), &Paginator::new(4));
    }
}
