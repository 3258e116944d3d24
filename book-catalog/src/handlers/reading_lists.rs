//! Reading list view: every book on one list, in id order

use axum::{
    extract::{Path, State},
    http::HeaderMap,
};

use super::books::accept_header;
use super::error::{during, ApiError, ApiOperation};
use crate::catalog::BookFilter;
use crate::models::{BookView, ReadingList, ReadingListView};
use crate::representation::{select, Encoded, READING_LIST_ENCODERS};
use crate::repository::BookRepository;
use crate::responses::ValidationErrors;
use crate::state::AppState;

/// `GET /reading-lists/{list}`
#[tracing::instrument(skip(state, headers))]
pub async fn reading_list<R: BookRepository>(
    State(state): State<AppState<R>>,
    Path(list): Path<String>,
    headers: HeaderMap,
) -> Result<Encoded, ApiError> {
    let op = ApiOperation::ReadingList;
    let representation = select(accept_header(&headers), READING_LIST_ENCODERS).map_err(during(op))?;

    let list: ReadingList = list.parse().map_err(|e: crate::models::UnknownReadingList| {
        let mut errors = ValidationErrors::new();
        errors.add_field_error("list", "INVALID", e.to_string());
        ApiError::validation_failed(errors).with_operation(op)
    })?;

    let predicate = BookFilter::default().with_list(list).build();
    let books = state
        .repository()
        .find_all()
        .await
        .map_err(during(op))?
        .into_iter()
        .filter(|book| predicate.matches(book))
        .map(BookView::from)
        .collect();

    representation
        .encode(&ReadingListView { list, books })
        .map_err(during(op))
}
