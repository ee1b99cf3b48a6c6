//! Location entity model.

use boxhub_core::types::{LocationId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::path;

/// A node in a workspace's location hierarchy.
///
/// The node's position is fully encoded in `path`; there is no stored
/// parent reference. The parent is the location whose path equals
/// [`Location::parent_path`], looked up on demand.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    /// Unique location identifier.
    pub id: LocationId,
    /// The owning workspace; immutable after creation.
    pub workspace_id: WorkspaceId,
    /// Human-readable display name (arbitrary Unicode).
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Materialized path, e.g. `root.basement.shelf_a`.
    pub path: String,
    /// Soft-delete flag; deleted rows are invisible to hierarchy queries.
    pub is_deleted: bool,
    /// When the location was created.
    pub created_at: DateTime<Utc>,
    /// When the location was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Number of path segments, anchor included.
    pub fn depth(&self) -> usize {
        path::depth(&self.path)
    }

    /// The parent's path, or `""` for a single-segment path.
    pub fn parent_path(&self) -> &str {
        path::parent_path(&self.path)
    }

    /// Whether this location sits directly below the anchor.
    pub fn is_top_level(&self) -> bool {
        self.parent_path() == path::PATH_ANCHOR
    }
}

/// Data required to create a new location row.
///
/// The path is computed by the service layer before insertion; the store
/// persists it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
    /// The owning workspace.
    pub workspace_id: WorkspaceId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Materialized path.
    pub path: String,
}
