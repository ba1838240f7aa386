//! SQLite persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain records and
//! nothing else; validation and error wording live in the domain.
//! Connections come from a `bb8` pool of `diesel-async` wrapped SQLite
//! connections.
//!
//! # Example
//!
//! ```ignore
//! use mining_insights::outbound::persistence::{
//!     DbPool, DieselCountryRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("mining.db").await?;
//! let pool = DbPool::new(PoolConfig::new("mining.db")).await?;
//! let countries = DieselCountryRepository::new(pool);
//! ```

mod diesel_entity_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_entity_repository::{
    DieselCountryRepository, DieselMineralInsightRepository, DieselMineralPriceRepository,
    DieselMineralRepository, DieselProductionStatRepository, DieselRoleRepository,
    DieselSiteRepository, DieselUserRepository,
};
pub use migrations::{MigrationError, run_migrations};
pub use pool::{AsyncSqliteConnection, DbPool, PoolConfig, PoolError};
