//! Startup orchestration: migrations, pool, price seeding and the bootstrap
//! administrator.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::{AppSettings, SettingsError};
use crate::domain::{AccountService, Error, PriceSeeder};
use crate::outbound::persistence::{
    DbPool, DieselMineralPriceRepository, DieselUserRepository, MigrationError, PoolConfig,
    PoolError, run_migrations,
};
use crate::outbound::security::Argon2PasswordHasher;

/// Errors returned while preparing the store.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Settings were inconsistent.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Migrations failed.
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    /// The pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Seeding the price table failed.
    #[error("price seeding failed: {0}")]
    Seeding(#[source] Error),
    /// Creating the bootstrap administrator failed.
    #[error("administrator bootstrap failed: {0}")]
    Administrator(#[source] Error),
}

/// Migrate the database, open the pool and apply the configured seeds.
///
/// # Examples
///
/// ```rust,no_run
/// use mining_insights::config::AppSettings;
/// use mining_insights::startup::prepare_store;
///
/// # async fn run(settings: AppSettings) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = prepare_store(&settings).await?;
/// # drop(pool);
/// # Ok(())
/// # }
/// ```
pub async fn prepare_store(settings: &AppSettings) -> Result<DbPool, StartupError> {
    let administrator = settings.administrator()?;
    let database_url = settings.database_url();

    let applied = run_migrations(database_url).await?;
    info!(applied, database_url, "migrations applied");

    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size())
            .with_connection_timeout(settings.pool_connection_timeout()),
    )
    .await?;

    if settings.seed_prices {
        PriceSeeder::new(Arc::new(DieselMineralPriceRepository::new(pool.clone())))
            .seed()
            .await
            .map_err(StartupError::Seeding)?;
    } else {
        info!(reason = "disabled", "price seeding skipped");
    }

    if let Some((username, password)) = administrator {
        let accounts = AccountService::new(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(Argon2PasswordHasher::new()),
        );
        let created = accounts
            .ensure_administrator(username, password)
            .await
            .map_err(StartupError::Administrator)?;
        if !created {
            info!(username, "administrator account already present");
        }
    }

    Ok(pool)
}
