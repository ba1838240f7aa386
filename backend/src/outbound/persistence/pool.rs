//! Async connection pool for Diesel SQLite connections.
//!
//! SQLite has no async driver, so each connection is a blocking
//! `SqliteConnection` inside `diesel-async`'s `SyncConnectionWrapper`, which
//! runs statements on Tokio's blocking pool. `bb8` manages checkout so
//! adapters see the same pool shape regardless of backend.
//!
//! Every new connection sets `PRAGMA busy_timeout` so concurrent writers
//! wait for SQLite's lock instead of failing immediately. It also switches
//! `foreign_keys` off: the bundled SQLite enforces references by default,
//! and the reference tables allow dangling ids after a delete.

use std::time::Duration;

use diesel::{ConnectionError, ConnectionResult, SqliteConnection};
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, RunQueryDsl};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Async-capable SQLite connection used by every adapter.
pub type AsyncSqliteConnection = SyncConnectionWrapper<SqliteConnection>;

const CONNECTION_PRAGMAS: [&str; 2] = [
    "PRAGMA busy_timeout = 5000",
    "PRAGMA foreign_keys = OFF",
];

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use mining_insights::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("mining.db")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_url(), "mining.db");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a configuration for the SQLite file at `database_url`.
    ///
    /// Defaults: 8 connections and a 10 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 8,
            connection_timeout: Duration::from_secs(10),
        }
    }

    /// Set the maximum number of connections in the pool.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the connection checkout timeout.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Path or URL of the database file.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

fn establish_connection(url: &str) -> BoxFuture<'_, ConnectionResult<AsyncSqliteConnection>> {
    async move {
        let mut conn = AsyncSqliteConnection::establish(url).await?;
        for pragma in CONNECTION_PRAGMAS {
            diesel::sql_query(pragma)
                .execute(&mut conn)
                .await
                .map_err(ConnectionError::CouldntSetupConfiguration)?;
        }
        Ok(conn)
    }
    .boxed()
}

/// Async connection pool for SQLite via Diesel.
///
/// # Example
///
/// ```ignore
/// let pool = DbPool::new(PoolConfig::new("mining.db")).await?;
/// let mut conn = pool.get().await?;
/// ```
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncSqliteConnection>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the first connection cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(establish_connection);
        let manager = AsyncDieselConnectionManager::<AsyncSqliteConnection>::new_with_config(
            config.database_url,
            manager_config,
        );

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncSqliteConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_defaults() {
        let config = PoolConfig::new("mining.db");
        assert_eq!(config.database_url(), "mining.db");
        assert_eq!(config.max_size, 8);
        assert_eq!(config.connection_timeout, Duration::from_secs(10));
    }

    #[rstest]
    fn pool_config_builder() {
        let config = PoolConfig::new("mining.db")
            .with_max_size(2)
            .with_connection_timeout(Duration::from_secs(1));
        assert_eq!(config.max_size, 2);
        assert_eq!(config.connection_timeout, Duration::from_secs(1));
    }

    #[rstest]
    #[tokio::test]
    async fn checks_out_connections_from_a_file_database() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pool.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(1))
            .await
            .expect("pool builds");
        assert!(pool.get().await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn pooled_connections_accept_dangling_references() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("references.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(1))
            .await
            .expect("pool builds");
        let mut conn = pool.get().await.expect("checkout");
        for statement in [
            "CREATE TABLE parents (id INTEGER PRIMARY KEY NOT NULL)",
            "CREATE TABLE children (id INTEGER PRIMARY KEY NOT NULL, \
             parent_id INTEGER NOT NULL REFERENCES parents (id))",
            "INSERT INTO parents (id) VALUES (1)",
            "INSERT INTO children (id, parent_id) VALUES (1, 1)",
            "DELETE FROM parents WHERE id = 1",
            "INSERT INTO children (id, parent_id) VALUES (2, 42)",
        ] {
            diesel::sql_query(statement)
                .execute(&mut conn)
                .await
                .unwrap_or_else(|err| panic!("{statement}: {err}"));
        }
    }
}
