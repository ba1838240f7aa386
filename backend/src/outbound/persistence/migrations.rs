//! Embedded schema migrations.
//!
//! Migrations run on a plain blocking `SqliteConnection` inside
//! `spawn_blocking`, before the pool hands out connections.

use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database file could not be opened.
    #[error("failed to open database {database_url}: {source}")]
    Connect {
        database_url: String,
        #[source]
        source: diesel::ConnectionError,
    },
    /// A migration failed to apply.
    #[error("failed to apply migrations to {database_url}: {message}")]
    Apply {
        database_url: String,
        message: String,
    },
    /// The blocking task was cancelled or panicked.
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// Apply every pending migration and return how many ran.
///
/// # Errors
/// See [`MigrationError`].
pub async fn run_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || apply_pending(&database_url))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })?
}

fn apply_pending(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection =
        SqliteConnection::establish(database_url).map_err(|source| MigrationError::Connect {
            database_url: database_url.to_owned(),
            source,
        })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            database_url: database_url.to_owned(),
            message: err.to_string(),
        })?;
    Ok(applied.len())
}
