//! Shared fixtures for the SQLite adapter tests.

use mining_insights::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tempfile::TempDir;

/// A migrated database file that lives as long as the value.
pub struct TestDatabase {
    pub pool: DbPool,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a fresh database in a temporary directory and migrate it.
    pub async fn migrated() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = dir.path().join("mining.db").to_string_lossy().into_owned();
        run_migrations(&url).await.expect("migrations apply");
        let pool = DbPool::new(PoolConfig::new(&url).with_max_size(2))
            .await
            .expect("pool builds");
        Self { pool, _dir: dir }
    }
}
