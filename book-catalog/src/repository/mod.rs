//! Persistence boundary for the catalog
//!
//! - [`Repository`]: generic record store (`find_all`, `find_by_id`, `create`,
//!   `update`, `delete`)
//! - [`BookRepository`]: the repository the HTTP handlers are generic over
//! - [`InMemoryBookRepository`]: the store shipped with the service
//!
//! Filtering, ordering and paging are not part of the store contract; the
//! catalog pipeline applies them to the sequence `find_all` returns.

mod error;
mod memory;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryBookRepository;
pub use traits::{BookRepository, Repository, RepositoryResult};
