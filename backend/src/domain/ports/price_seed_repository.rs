//! Driven port used to seed historical prices at startup.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::MineralPriceDraft;

/// Idempotent bulk insert of price rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSeedRepository: Send + Sync {
    /// Insert each row whose `(mineral_name, year)` pair is not stored yet.
    ///
    /// Returns how many rows were inserted.
    async fn insert_missing(&self, rows: &[MineralPriceDraft]) -> Result<usize, RepositoryError>;
}
