//! Item entity model.

use boxhub_core::types::{ItemId, LocationId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tracked physical box.
///
/// Items live inside locations; an item with no location is "unassigned"
/// (scanned but not yet shelved).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// The owning workspace; immutable after creation.
    pub workspace_id: WorkspaceId,
    /// The location this item is placed in, if any.
    pub location_id: Option<LocationId>,
    /// Human-readable display name.
    pub name: String,
    /// Optional free-text description of the contents.
    pub description: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Whether the item has been placed in a location.
    pub fn is_assigned(&self) -> bool {
        self.location_id.is_some()
    }
}

/// Data required to create a new item row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    /// The owning workspace.
    pub workspace_id: WorkspaceId,
    /// Initial placement, if any.
    pub location_id: Option<LocationId>,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
