//! Repository doubles shared by unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::error::{RepositoryError, RepositoryOperation};
use super::memory::InMemoryBookRepository;
use super::traits::{Repository, RepositoryResult};
use crate::models::{Book, BookId, NewBook};

/// Store that fails every call
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingRepository;

impl Repository<BookId, Book, NewBook> for FailingRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Book>> {
        Err(RepositoryError::unavailable(RepositoryOperation::FindAll, "down"))
    }

    async fn find_by_id(&self, _id: &BookId) -> RepositoryResult<Option<Book>> {
        Err(RepositoryError::unavailable(RepositoryOperation::FindById, "down"))
    }

    async fn create(&self, _data: NewBook) -> RepositoryResult<Book> {
        Err(RepositoryError::unavailable(RepositoryOperation::Create, "down"))
    }

    async fn update(&self, _entity: Book) -> RepositoryResult<Book> {
        Err(RepositoryError::unavailable(RepositoryOperation::Update, "down"))
    }

    async fn delete(&self, _id: &BookId) -> RepositoryResult<bool> {
        Err(RepositoryError::unavailable(RepositoryOperation::Delete, "down"))
    }
}

/// In-memory store that counts `find_all` and `find_by_id` calls
///
/// Clones share both the records and the counter.
#[derive(Debug, Clone, Default)]
pub struct CountingRepository {
    inner: InMemoryBookRepository,
    reads: Arc<AtomicUsize>,
}

impl CountingRepository {
    pub async fn with_books(books: impl IntoIterator<Item = NewBook>) -> RepositoryResult<Self> {
        Ok(Self {
            inner: InMemoryBookRepository::with_books(books).await?,
            reads: Arc::default(),
        })
    }

    /// Reads served so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Repository<BookId, Book, NewBook> for CountingRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Book>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn create(&self, data: NewBook) -> RepositoryResult<Book> {
        self.inner.create(data).await
    }

    async fn update(&self, entity: Book) -> RepositoryResult<Book> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: &BookId) -> RepositoryResult<bool> {
        self.inner.delete(id).await
    }
}
