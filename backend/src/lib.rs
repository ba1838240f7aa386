//! Mining reference data service.
//!
//! Layout follows ports and adapters: [`domain`] holds records, reports,
//! export encoding and account rules; [`outbound`] implements the driven
//! ports over SQLite and Argon2; [`inbound`] exposes the driving ports over
//! HTTP.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod startup;

pub use middleware::Trace;
