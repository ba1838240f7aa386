//! Driven adapters: SQLite persistence and password hashing.

pub mod persistence;
pub mod security;
