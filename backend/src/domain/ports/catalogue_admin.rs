//! Driving port behind the administrator CRUD pages.

use async_trait::async_trait;

use crate::domain::{Error, Record, RecordId};

/// Validated CRUD over one reference table.
///
/// `D` is the payload accepted from administrators. It is the table's draft
/// for most records; user accounts take a plaintext password instead of a
/// hash.
#[async_trait]
pub trait CatalogueAdmin<R: Record, D = <R as Record>::Draft>: Send + Sync
where
    D: Send + 'static,
{
    /// Every row, ordered by id.
    async fn list(&self) -> Result<Vec<R>, Error>;

    /// Validate and insert a row.
    async fn add(&self, payload: D) -> Result<R, Error>;

    /// Validate and overwrite row `id`.
    async fn edit(&self, id: RecordId, payload: D) -> Result<R, Error>;

    /// Remove row `id`.
    async fn delete(&self, id: RecordId) -> Result<(), Error>;
}
