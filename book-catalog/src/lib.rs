//! # book-catalog
//!
//! A book catalog served over HTTP. Books live on one of three reading
//! lists and can be listed with filtering, ordering and pagination, read
//! individually, uploaded with a cover image through multipart forms, and
//! grouped by reading list.
//!
//! ## Features
//!
//! - **Listing pipeline**: predicate, order and paginator stages in [`catalog`]
//! - **Representations**: JSON, XML and CSV chosen from the `Accept` header
//! - **Covers**: stored image bytes with a placeholder fallback
//! - **Versioned routes**: `/api/v1` (deprecated) and `/api/v2`
//! - **Middleware stack**: request ids, panic recovery, body limits, compression, CORS
//! - **Graceful shutdown**: SIGTERM and SIGINT drain in-flight requests
//!
//! ## Example
//!
//! ```rust,no_run
//! use book_catalog::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(InMemoryBookRepository::new())
//!         .with_default_page_size(config.catalog.default_page_size);
//!
//!     Server::new(config).serve(router(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod representation;
pub mod responses;
pub mod server;
pub mod state;
pub mod versioning;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{
        BookFilter, BookOrder, CatalogQuery, OrderSpec, Page, PageRequest, Paginator, SortField,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorResponse, FieldError, Result};
    pub use crate::handlers::{router, ApiError, ApiErrorKind, ListQuery};
    pub use crate::health::health;
    pub use crate::models::{Book, BookId, BookView, NewBook, ReadingList, ReadingListView};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        BookRepository, InMemoryBookRepository, Repository, RepositoryError, RepositoryResult,
    };
    pub use crate::representation::{load_placeholder, Encoded, Format};
    pub use crate::responses::{Created, NoContent, ValidationErrors};
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::versioning::{ApiVersion, API_VERSION_HEADER};
}
