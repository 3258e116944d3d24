//! Repository trait definitions
//!
//! The catalog treats persistence as an external collaborator reached through
//! [`Repository`]. Methods use RPITIT (return position `impl Trait` in
//! traits) so implementations can be plain `async fn`s.

use std::future::Future;

use super::error::RepositoryError;
use crate::models::{Book, BookId, NewBook};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Generic record store
///
/// # Type Parameters
///
/// - `Id`: the identifier type for the entity
/// - `Entity`: the full entity type returned from queries
/// - `Create`: the data needed to create an entity; the store assigns the id
///
/// # Example
///
/// ```rust,ignore
/// let books = repo.find_all().await?;
/// let created = repo.create(NewBook::new("Dune", ReadingList::ToRead)).await?;
/// assert!(repo.find_by_id(&created.id).await?.is_some());
/// ```
pub trait Repository<Id, Entity, Create>: Send + Sync {
    /// Every entity in source order
    ///
    /// Source order is the store's natural order (ascending id for the
    /// in-memory store). Callers that need another order sort the result.
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Find an entity by its unique identifier
    ///
    /// Returns `Ok(Some(entity))` if found, `Ok(None)` if not found.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Insert a new entity and return it with its assigned id
    fn create(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Replace an existing entity
    ///
    /// Fails with a `NotFound` error when no entity has the same id; it never
    /// inserts.
    fn update(&self, entity: Entity) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Delete an entity by id
    ///
    /// Returns `Ok(true)` if an entity was removed, `Ok(false)` if none existed.
    fn delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}

/// A [`Repository`] of books, usable as shared handler state
pub trait BookRepository: Repository<BookId, Book, NewBook> + 'static {}

impl<T> BookRepository for T where T: Repository<BookId, Book, NewBook> + 'static {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadingList;
    use crate::repository::testing::FailingRepository;
    use crate::repository::RepositoryOperation;

    fn assert_book_repository<R: BookRepository>(_repo: &R) {}

    #[tokio::test]
    async fn test_trait_implementable_with_async_fn() {
        let repo = FailingRepository;
        assert_book_repository(&repo);

        let err = repo
            .create(NewBook::new("Dune", ReadingList::ToRead))
            .await
            .unwrap_err();
        assert_eq!(err.operation, RepositoryOperation::Create);
        assert!(err.is_retriable());
    }
}
