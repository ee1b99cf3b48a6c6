//! Location management and tree services.

pub mod service;
pub mod tree;

pub use service::{CreateLocationRequest, LocationService, UpdateLocationRequest};
pub use tree::TreeService;
