//! Driven port for the uniform CRUD operations every reference table offers.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Record, RecordId};

define_port_error! {
    /// Failures raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached or a connection could not be checked out.
        Connection { message: String } => "repository connection failed: {message}",
        /// The statement failed.
        Query { message: String } => "repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Constraint { message: String } => "repository constraint violated: {message}",
        /// No row has the requested primary key.
        NotFound { entity: String, id: i32 } => "{entity} {id} not found",
    }
}

impl RepositoryError {
    /// Not-found error for the table backing `R`.
    pub fn missing<R: Record>(id: RecordId) -> Self {
        Self::not_found(R::ENTITY.label(), id.get())
    }
}

/// CRUD access to one reference table.
///
/// Each call is independent and auto-committed. Deletes never cascade.
#[async_trait]
pub trait EntityRepository<R: Record>: Send + Sync {
    /// Every row, ordered by primary key ascending.
    async fn list(&self) -> Result<Vec<R>, RepositoryError>;

    /// The row with `id`, if present.
    async fn get(&self, id: RecordId) -> Result<Option<R>, RepositoryError>;

    /// Insert a row and return it with its assigned id.
    async fn add(&self, draft: &R::Draft) -> Result<R, RepositoryError>;

    /// Overwrite every column of row `id`.
    ///
    /// Fails with [`RepositoryError::NotFound`] when no such row exists.
    async fn edit(&self, id: RecordId, draft: &R::Draft) -> Result<R, RepositoryError>;

    /// Remove row `id`.
    ///
    /// Fails with [`RepositoryError::NotFound`] when no such row exists.
    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError>;
}
