//! # boxhub-entity
//!
//! Domain entity models for BoxHub. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.
//!
//! The crate also holds the materialized-path engine
//! ([`location::path`]) and the persistence contracts ([`store`]) that
//! `boxhub-database` implements.

pub mod item;
pub mod location;
pub mod store;
pub mod workspace;
