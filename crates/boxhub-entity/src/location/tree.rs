//! Nested tree structure for hierarchical display.

use boxhub_core::types::LocationId;
use serde::{Deserialize, Serialize};

/// A node in a rendered location tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationNode {
    /// Location ID.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Full materialized path.
    pub path: String,
    /// Number of direct child locations.
    pub child_count: u64,
    /// Number of items placed directly in this location.
    pub item_count: u64,
    /// Child nodes.
    pub children: Vec<LocationNode>,
}
