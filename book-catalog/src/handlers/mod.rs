//! HTTP endpoints of the catalog
//!
//! | Route                          | Handler                     |
//! |--------------------------------|-----------------------------|
//! | `GET /books`                   | [`books::list_books`]       |
//! | `GET /books/{id}`              | [`books::get_book`]         |
//! | `GET /books/covers/{id}`       | [`books::get_cover`]        |
//! | `POST /books`                  | [`books::create_book`]      |
//! | `PUT /books`                   | [`books::update_book`]      |
//! | `DELETE /books/{id}`           | [`books::delete_book`]      |
//! | `GET /reading-lists/{list}`    | [`reading_lists::reading_list`] |
//!
//! Every route is mounted under each API version prefix (see
//! [`versioned_api`]); `/health` is unversioned.
//!
//! # Example
//!
//! ```rust
//! use book_catalog::handlers::router;
//! use book_catalog::repository::InMemoryBookRepository;
//! use book_catalog::state::AppState;
//!
//! let app: axum::Router = router(AppState::new(InMemoryBookRepository::new()));
//! ```

pub mod books;
mod error;
mod query;
pub mod reading_lists;
mod upload;

pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use query::ListQuery;
pub use upload::{BookUpload, UploadMode, ValidatedUpload};

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::health::health;
use crate::repository::BookRepository;
use crate::state::AppState;
use crate::versioning::versioned_api;

/// Build the catalog router over `state`
///
/// Body size is left to the server's `RequestBodyLimitLayer`, so axum's own
/// multipart limit is disabled.
pub fn router<R: BookRepository>(state: AppState<R>) -> Router {
    let api = Router::new()
        .route(
            "/books",
            get(books::list_books::<R>)
                .post(books::create_book::<R>)
                .put(books::update_book::<R>),
        )
        .route(
            "/books/{id}",
            get(books::get_book::<R>).delete(books::delete_book::<R>),
        )
        .route("/books/covers/{id}", get(books::get_cover::<R>))
        .route("/reading-lists/{list}", get(reading_lists::reading_list::<R>));

    versioned_api(api)
        .route("/health", get(health::<R>))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
