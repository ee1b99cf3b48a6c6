//! # boxhub-core
//!
//! Core crate for BoxHub. Contains configuration schemas, typed
//! identifiers, pagination types, logging initialization, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other BoxHub crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
