//! Item management services.

pub mod service;

pub use service::{CreateItemRequest, ItemService, UpdateItemRequest};
