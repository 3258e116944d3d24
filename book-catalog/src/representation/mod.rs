//! Representation encoding
//!
//! Each endpoint declares an encoder table: the formats it can produce,
//! preferred first, each paired with the function that writes it. The
//! `Accept` header picks a row with [`negotiate`]; the chosen encoder writes
//! the whole body into memory before any response is built.
//!
//! ```rust
//! use book_catalog::catalog::{paginate, PageRequest};
//! use book_catalog::models::BookView;
//! use book_catalog::representation::{encode_with, PAGE_ENCODERS};
//! use http::HeaderValue;
//!
//! let page = paginate(Vec::<BookView>::new(), &PageRequest::default());
//! let accept = HeaderValue::from_static("text/csv");
//! let encoded = encode_with(Some(&accept), PAGE_ENCODERS, &page).unwrap();
//! assert_eq!(encoded.content_type(), "text/csv; charset=utf-8");
//! ```

pub mod cover;
mod csv;
mod negotiate;
mod xml;

pub use cover::{load_placeholder, sniff_content_type, PLACEHOLDER_COVER};
pub use negotiate::{accepts, negotiate, Format, NotAcceptable};
pub use xml::{to_xml, XmlDocument, XmlElement};

use axum::{
    body::Bytes,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::Page;
use crate::models::{BookView, ReadingListView};

/// Serialization into the negotiated format failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to encode {format:?} representation: {message}")]
pub struct EncodeError {
    pub format: Format,
    pub message: String,
}

impl EncodeError {
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

/// Failure to produce a representation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepresentationError {
    #[error(transparent)]
    NotAcceptable(#[from] NotAcceptable),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Writes a value in one format
pub type Encoder<T> = fn(&T) -> Result<Vec<u8>, EncodeError>;

/// Formats offered by the collection endpoint
pub const PAGE_ENCODERS: &[(Format, Encoder<Page<BookView>>)] = &[
    (Format::Json, to_json::<Page<BookView>>),
    (Format::Xml, to_xml::<Page<BookView>>),
    (Format::Csv, page_to_csv),
];

/// Formats offered for a single book
pub const BOOK_ENCODERS: &[(Format, Encoder<BookView>)] = &[
    (Format::Json, to_json::<BookView>),
    (Format::Xml, to_xml::<BookView>),
];

/// Formats offered for a reading list
pub const READING_LIST_ENCODERS: &[(Format, Encoder<ReadingListView>)] = &[
    (Format::Json, to_json::<ReadingListView>),
    (Format::Xml, to_xml::<ReadingListView>),
];

/// Formats offered by the cover endpoint
pub const COVER_FORMATS: &[Format] = &[Format::Image];

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    serde_json::to_vec(value).map_err(|e| EncodeError::new(Format::Json, e.to_string()))
}

fn page_to_csv(page: &Page<BookView>) -> Result<Vec<u8>, EncodeError> {
    Ok(csv::encode_books(&page.results).into_bytes())
}

/// A row of an encoder table chosen by negotiation
#[derive(Debug)]
pub struct Negotiated<T> {
    format: Format,
    encoder: Encoder<T>,
}

impl<T> Clone for Negotiated<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Negotiated<T> {}

impl<T> Negotiated<T> {
    pub fn format(&self) -> Format {
        self.format
    }

    /// Encode `value` in the negotiated format
    pub fn encode(&self, value: &T) -> Result<Encoded, EncodeError> {
        let body = (self.encoder)(value)?;
        Ok(Encoded::new(self.format.content_type(), body))
    }
}

/// Choose the encoder for `accept` from `table`
///
/// Handlers call this before touching the repository so an unacceptable
/// request does no work.
pub fn select<T>(
    accept: Option<&HeaderValue>,
    table: &[(Format, Encoder<T>)],
) -> Result<Negotiated<T>, NotAcceptable> {
    let formats: Vec<Format> = table.iter().map(|(format, _)| *format).collect();
    let format = negotiate(accept, &formats)?;
    let encoder = table
        .iter()
        .find(|(candidate, _)| *candidate == format)
        .map(|(_, encoder)| *encoder)
        .ok_or_else(|| NotAcceptable {
            requested: format.content_type().to_string(),
        })?;
    Ok(Negotiated { format, encoder })
}

/// Negotiate and encode in one step
pub fn encode_with<T>(
    accept: Option<&HeaderValue>,
    table: &[(Format, Encoder<T>)],
    value: &T,
) -> Result<Encoded, RepresentationError> {
    Ok(select(accept, table)?.encode(value)?)
}

/// Check that the client accepts an image before serving a cover
pub fn accept_cover(accept: Option<&HeaderValue>) -> Result<(), NotAcceptable> {
    negotiate(accept, COVER_FORMATS).map(|_| ())
}

/// Wrap raw cover bytes, labelled with their sniffed content type
///
/// The sniffed type must itself be acceptable: a stored JPEG asked for with
/// `Accept: image/png` is refused rather than sent as `image/jpeg`.
pub fn encode_cover(accept: Option<&HeaderValue>, image: Bytes) -> Result<Encoded, NotAcceptable> {
    let content_type = sniff_content_type(&image);
    if !accepts(accept, content_type) {
        return Err(NotAcceptable {
            requested: accept
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string(),
        });
    }
    Ok(Encoded {
        content_type,
        body: image,
    })
}

/// A fully encoded response body and its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    content_type: &'static str,
    body: Bytes,
}

impl Encoded {
    fn new(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            content_type,
            body: Bytes::from(body),
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl IntoResponse for Encoded {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type))],
            self.body,
        )
            .into_response()
    }
}
