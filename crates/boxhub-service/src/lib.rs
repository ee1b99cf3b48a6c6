//! # boxhub-service
//!
//! Business logic service layer for BoxHub. Each service orchestrates the
//! entity stores to implement application-level use cases: hierarchy
//! mutation, tree assembly, and item placement.
//!
//! Services follow constructor injection. Dependencies are provided at
//! construction time as `Arc<dyn Store>` trait references, so the same
//! service runs against PostgreSQL in production and against an in-memory
//! double in tests.

pub mod context;
pub mod item;
pub mod location;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use item::{CreateItemRequest, ItemService, UpdateItemRequest};
pub use location::{CreateLocationRequest, LocationService, TreeService, UpdateLocationRequest};
