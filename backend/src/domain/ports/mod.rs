//! Domain ports.
//!
//! Driven ports (`EntityRepository`, `UserRepository`, `PriceSeedRepository`,
//! `PasswordHasher`) are implemented by outbound adapters. Driving ports
//! (`LoginService`, `RegistrationService`, `CatalogueAdmin`, `ReportQuery`,
//! `ResearchInsights`) are what inbound adapters call.

mod macros;

mod account;
mod catalogue_admin;
mod entity_repository;
mod in_memory;
mod password_hasher;
mod price_seed_repository;
mod report_query;
mod research_insights;
mod user_repository;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use account::{MockLoginService, MockRegistrationService};
pub use account::{LoginService, RegistrationService};
pub use catalogue_admin::CatalogueAdmin;
pub use entity_repository::{EntityRepository, RepositoryError};
pub use in_memory::{InMemoryEntityRepository, InMemoryUserRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use price_seed_repository::MockPriceSeedRepository;
pub use price_seed_repository::PriceSeedRepository;
#[cfg(test)]
pub use report_query::MockReportQuery;
pub use report_query::ReportQuery;
#[cfg(test)]
pub use research_insights::MockResearchInsights;
pub use research_insights::ResearchInsights;
pub use user_repository::UserRepository;
