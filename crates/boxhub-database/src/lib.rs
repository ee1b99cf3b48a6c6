//! # boxhub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all BoxHub entities. The repositories implement
//! the store traits from `boxhub-entity`.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
