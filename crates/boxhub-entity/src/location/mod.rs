//! Location domain entities and the materialized-path engine.

pub mod model;
pub mod path;
pub mod tree;

pub use model::{Location, NewLocation};
pub use tree::LocationNode;
