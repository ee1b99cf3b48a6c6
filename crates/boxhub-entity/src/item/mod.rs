//! Item (physical box) domain entities.

pub mod model;

pub use model::{Item, NewItem};
