//! HTTP client for the book catalog service
//!
//! ```rust,no_run
//! use book_catalog::handlers::ListQuery;
//! use book_catalog::models::ReadingList;
//! use book_catalog_client::{BookUpload, CatalogClient};
//!
//! # async fn run() -> book_catalog_client::Result<()> {
//! let client = CatalogClient::new("http://localhost:8080/api/v2");
//! let created = client
//!     .create_book(&BookUpload::new("Dune", ReadingList::ToRead).with_author("Frank Herbert"))
//!     .await?;
//! let page = client
//!     .list_books(&ListQuery::new().with_author("herbert"))
//!     .await?;
//! assert!(page.results.iter().any(|book| book.id == created.id));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod upload;

pub use error::{ClientError, Result};
pub use upload::{BookUpload, MultipartBody, PartContent, UploadPart};

use book_catalog::catalog::Page;
use book_catalog::handlers::ListQuery;
use book_catalog::models::{BookId, BookView, ReadingList, ReadingListView};
use reqwest::{header, Response};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v2";

/// Typed access to one catalog server
///
/// Calls are single attempts; transport and status failures are returned
/// as-is.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Client for a versioned base URL such as `http://host:8080/api/v2`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /books` as JSON
    pub async fn list_books(&self, query: &ListQuery) -> Result<Page<BookView>> {
        let response = self
            .http
            .get(self.url("/books"))
            .query(query)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    /// `GET /reading-lists/{list}`
    pub async fn reading_list(&self, list: ReadingList) -> Result<ReadingListView> {
        let response = self
            .http
            .get(self.url(&format!("/reading-lists/{list}")))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    /// `GET /books/{id}`
    pub async fn get_book(&self, id: BookId) -> Result<BookView> {
        let response = self
            .http
            .get(self.url(&format!("/books/{id}")))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    /// `GET /books/covers/{id}`: stored cover or the server's placeholder
    pub async fn get_cover(&self, id: BookId) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(self.url(&format!("/books/covers/{id}")))
            .header(header::ACCEPT, "image/*")
            .send()
            .await?;
        Ok(error_for_status(response).await?.bytes().await?.to_vec())
    }

    /// `POST /books`
    pub async fn create_book(&self, upload: &BookUpload) -> Result<BookView> {
        let form = upload.encode().into_form()?;
        let response = self
            .http
            .post(self.url("/books"))
            .multipart(form)
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    /// `PUT /books`; `upload.id` names the target
    pub async fn update_book(&self, upload: &BookUpload) -> Result<BookView> {
        let form = upload.encode().into_form()?;
        let response = self
            .http
            .put(self.url("/books"))
            .multipart(form)
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    /// `DELETE /books/{id}`
    pub async fn delete_book(&self, id: BookId) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/books/{id}")))
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`ClientError::Status`], keeping its body
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
