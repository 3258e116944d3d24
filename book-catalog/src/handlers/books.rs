//! Book endpoints
//!
//! Each handler sequences the catalog components and leaves status code
//! choice to [`ApiError`]. Content negotiation runs first, so a request for
//! an unsupported format never reaches the repository.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue},
    Json,
};

use super::error::{during, ApiError, ApiOperation};
use super::query::ListQuery;
use super::upload::{BookUpload, UploadMode};
use crate::models::{book_path, Book, BookId, BookView};
use crate::representation::{accept_cover, encode_cover, select, Encoded, BOOK_ENCODERS, PAGE_ENCODERS};
use crate::repository::BookRepository;
use crate::responses::{Created, NoContent, ValidationErrors};
use crate::state::AppState;
use crate::versioning::ApiVersion;

pub(crate) fn accept_header(headers: &HeaderMap) -> Option<&HeaderValue> {
    headers.get(header::ACCEPT)
}

fn parse_id(id: Result<Path<BookId>, PathRejection>, operation: ApiOperation) -> Result<BookId, ApiError> {
    id.map(|Path(id)| id).map_err(|rejection| {
        let mut errors = ValidationErrors::new();
        errors.add_field_error("id", "INVALID", rejection.body_text());
        ApiError::validation_failed(errors).with_operation(operation)
    })
}

fn parse_query(
    params: Result<Query<ListQuery>, QueryRejection>,
    operation: ApiOperation,
) -> Result<ListQuery, ApiError> {
    params.map(|Query(params)| params).map_err(|rejection| {
        let mut errors = ValidationErrors::new();
        errors.add_field_error("query", "INVALID", rejection.body_text());
        ApiError::validation_failed(errors).with_operation(operation)
    })
}

/// `GET /books`: filtered, ordered and paged list
#[tracing::instrument(skip(state, params, headers))]
pub async fn list_books<R: BookRepository>(
    State(state): State<AppState<R>>,
    params: Result<Query<ListQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Encoded, ApiError> {
    let op = ApiOperation::List;
    let representation = select(accept_header(&headers), PAGE_ENCODERS).map_err(during(op))?;

    let query = parse_query(params, op)?
        .to_catalog_query()
        .map_err(|e| ApiError::validation_failed(e).with_operation(op))?;
    let prepared = query.prepare().map_err(during(op))?;

    let books = state.repository().find_all().await.map_err(during(op))?;
    let page = prepared.run(books, state.paginator()).map(BookView::from);

    tracing::debug!(
        total = page.total,
        page = page.page,
        returned = page.results.len(),
        format = ?representation.format(),
        "listed books"
    );

    representation.encode(&page).map_err(during(op))
}

/// `GET /books/{id}`
#[tracing::instrument(skip(state, headers, id))]
pub async fn get_book<R: BookRepository>(
    State(state): State<AppState<R>>,
    id: Result<Path<BookId>, PathRejection>,
    headers: HeaderMap,
) -> Result<Encoded, ApiError> {
    let op = ApiOperation::Get;
    let representation = select(accept_header(&headers), BOOK_ENCODERS).map_err(during(op))?;
    let id = parse_id(id, op)?;

    let book = state
        .repository()
        .find_by_id(&id)
        .await
        .map_err(during(op))?
        .ok_or_else(|| ApiError::not_found("Book", id.to_string()).with_operation(op))?;

    representation.encode(&BookView::from(book)).map_err(during(op))
}

/// `GET /books/covers/{id}`: stored cover, or the placeholder
///
/// A missing book, a book without a cover and an unparseable id all get
/// the placeholder. The image's own type must also satisfy `Accept`.
#[tracing::instrument(skip(state, headers))]
pub async fn get_cover<R: BookRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Encoded, ApiError> {
    let op = ApiOperation::Cover;
    accept_cover(accept_header(&headers)).map_err(during(op))?;

    let stored = match id.trim().parse::<BookId>() {
        Ok(id) => state
            .repository()
            .find_by_id(&id)
            .await
            .map_err(during(op))?
            .and_then(|book| book.cover),
        Err(_) => None,
    };

    let image = match stored {
        Some(cover) => cover,
        None => {
            tracing::debug!(%id, "no stored cover, serving placeholder");
            state.placeholder().clone()
        }
    };

    encode_cover(accept_header(&headers), image).map_err(during(op))
}

/// `POST /books`: create from a multipart upload
#[tracing::instrument(skip(state, multipart))]
pub async fn create_book<R: BookRepository>(
    State(state): State<AppState<R>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Created<BookView>, ApiError> {
    let op = ApiOperation::Create;
    let upload = BookUpload::from_multipart(multipart)
        .await
        .map_err(|e| ApiError::validation_failed(e).with_operation(op))?;
    let valid = upload
        .validate(UploadMode::Create)
        .map_err(|e| ApiError::validation_failed(e).with_operation(op))?;

    let book = state.repository().create(valid.book).await.map_err(during(op))?;
    tracing::info!(id = book.id, title = %book.title, "created book");

    let location = book_path(ApiVersion::LATEST, book.id);
    Ok(Created::new(BookView::from(book)).with_location(location))
}

/// `PUT /books`: replace an existing book from a multipart upload
///
/// The target must exist. Without a new cover part the stored cover is
/// kept.
#[tracing::instrument(skip(state, multipart))]
pub async fn update_book<R: BookRepository>(
    State(state): State<AppState<R>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BookView>, ApiError> {
    let op = ApiOperation::Update;
    let upload = BookUpload::from_multipart(multipart)
        .await
        .map_err(|e| ApiError::validation_failed(e).with_operation(op))?;
    let valid = upload
        .validate(UploadMode::Update)
        .map_err(|e| ApiError::validation_failed(e).with_operation(op))?;
    let id = valid
        .id
        .ok_or_else(|| ApiError::internal("validated update carries no id").with_operation(op))?;

    let existing = state
        .repository()
        .find_by_id(&id)
        .await
        .map_err(during(op))?
        .ok_or_else(|| ApiError::not_found("Book", id.to_string()).with_operation(op))?;

    let mut book = Book::from_new(id, valid.book);
    if book.cover.is_none() {
        book.cover = existing.cover;
    }

    let updated = state.repository().update(book).await.map_err(during(op))?;
    tracing::info!(id = updated.id, "updated book");

    Ok(Json(BookView::from(updated)))
}

/// `DELETE /books/{id}`
#[tracing::instrument(skip(state, id))]
pub async fn delete_book<R: BookRepository>(
    State(state): State<AppState<R>>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<NoContent, ApiError> {
    let op = ApiOperation::Delete;
    let id = parse_id(id, op)?;

    if state.repository().delete(&id).await.map_err(during(op))? {
        tracing::info!(id, "deleted book");
        Ok(NoContent)
    } else {
        Err(ApiError::not_found("Book", id.to_string()).with_operation(op))
    }
}
