//! In-memory book store
//!
//! Records live in a `BTreeMap` keyed by id, so `find_all` yields ascending
//! id order, which is also insertion order. Ids come from a monotonically
//! increasing sequence and are never reused.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{Repository, RepositoryResult};
use crate::error::{Error, Result};
use crate::models::{Book, BookId, NewBook};

const ENTITY: &str = "Book";

/// Thread-safe in-memory [`Repository`] of books
///
/// Cloning is cheap; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookRepository {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    books: RwLock<BTreeMap<BookId, Book>>,
    last_id: AtomicI64,
}

impl InMemoryBookRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `books`, inserted in the given order
    pub async fn with_books(books: impl IntoIterator<Item = NewBook>) -> RepositoryResult<Self> {
        let repo = Self::new();
        for book in books {
            repo.create(book).await?;
        }
        Ok(repo)
    }

    /// Create a store seeded from a JSON array of books
    ///
    /// Each element has `title`, `list` and optional `subtitle`, `author` and
    /// `summary`; covers cannot be seeded.
    pub async fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read(path).await?;
        let books: Vec<NewBook> = serde_json::from_slice(&raw).map_err(|e| {
            Error::Internal(format!("invalid seed file {}: {}", path.display(), e))
        })?;
        let count = books.len();
        let repo = Self::with_books(books)
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;
        tracing::info!(path = %path.display(), count, "Seeded catalog");
        Ok(repo)
    }

    fn next_id(&self) -> BookId {
        self.inner.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn ensure_title(operation: RepositoryOperation, title: &str) -> RepositoryResult<()> {
    if title.trim().is_empty() {
        return Err(RepositoryError::validation_failed(
            operation,
            "title must not be empty",
        ));
    }
    Ok(())
}

impl Repository<BookId, Book, NewBook> for InMemoryBookRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Book>> {
        let books = self.inner.books.read().await;
        Ok(books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>> {
        let books = self.inner.books.read().await;
        Ok(books.get(id).cloned())
    }

    async fn create(&self, data: NewBook) -> RepositoryResult<Book> {
        ensure_title(RepositoryOperation::Create, &data.title)?;

        let mut books = self.inner.books.write().await;
        let book = Book::from_new(self.next_id(), data);
        books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, entity: Book) -> RepositoryResult<Book> {
        ensure_title(RepositoryOperation::Update, &entity.title)?;

        let mut books = self.inner.books.write().await;
        match books.get_mut(&entity.id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(RepositoryError::not_found(
                RepositoryOperation::Update,
                ENTITY,
                entity.id.to_string(),
            )),
        }
    }

    async fn delete(&self, id: &BookId) -> RepositoryResult<bool> {
        let mut books = self.inner.books.write().await;
        Ok(books.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadingList;
    use crate::repository::RepositoryErrorKind;
    use std::io::Write;

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryBookRepository::new();
        let first = repo.create(NewBook::new("A", ReadingList::ToRead)).await.unwrap();
        let second = repo.create(NewBook::new("B", ReadingList::ToRead)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryBookRepository::new();
        let first = repo.create(NewBook::new("A", ReadingList::ToRead)).await.unwrap();
        assert!(repo.delete(&first.id).await.unwrap());
        let second = repo.create(NewBook::new("B", ReadingList::ToRead)).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_find_all_in_id_order() {
        let repo = InMemoryBookRepository::with_books(
            ["C", "A", "B"].map(|t| NewBook::new(t, ReadingList::ReadingNow)),
        )
        .await
        .unwrap();
        let titles: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryBookRepository::new();
        let ghost = Book::from_new(99, NewBook::new("Ghost", ReadingList::ToRead));
        let err = repo.update(ghost).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let repo = InMemoryBookRepository::new();
        let mut book = repo.create(NewBook::new("Old", ReadingList::ToRead)).await.unwrap();
        book.title = "New".to_string();
        repo.update(book.clone()).await.unwrap();
        assert_eq!(repo.find_by_id(&book.id).await.unwrap(), Some(book));
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let repo = InMemoryBookRepository::new();
        let err = repo.create(NewBook::new("  ", ReadingList::ToRead)).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ValidationFailed);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = InMemoryBookRepository::new();
        assert!(!repo.delete(&1).await.unwrap());
    }

    #[tokio::test]
    async fn test_from_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title":"Dune","author":"Frank Herbert","list":"already-read"}},
               {{"title":"Emma","list":"to-read"}}]"#
        )
        .unwrap();

        let repo = InMemoryBookRepository::from_seed_file(file.path()).await.unwrap();
        let books = repo.find_all().await.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].author.as_deref(), Some("Frank Herbert"));
        assert_eq!(books[1].list, ReadingList::ToRead);
    }

    #[tokio::test]
    async fn test_from_seed_file_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(InMemoryBookRepository::from_seed_file(file.path()).await.is_err());
    }
}
