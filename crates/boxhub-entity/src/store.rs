//! Persistence contracts for the hierarchy engine.
//!
//! The traits are defined here and implemented in `boxhub-database`
//! (PostgreSQL) and by the service crate's in-memory test double. Every
//! read excludes soft-deleted rows and is scoped to a single workspace;
//! implementations must enforce uniqueness of `(workspace_id, path)`
//! among non-deleted locations at the storage layer and surface a
//! violation as `ErrorKind::Conflict`; the engine's pre-checks are only
//! an optimization for a friendlier error.

use std::collections::HashMap;

use async_trait::async_trait;

use boxhub_core::result::AppResult;
use boxhub_core::types::{ItemId, LocationId, PageRequest, PageResponse, WorkspaceId};

use crate::item::{Item, NewItem};
use crate::location::{Location, NewLocation};
use crate::workspace::{CreateWorkspace, Workspace};

/// Store for workspace (tenant) rows.
#[async_trait]
pub trait WorkspaceStore: Send + Sync + 'static {
    /// Find a workspace by ID.
    async fn find_by_id(&self, id: WorkspaceId) -> AppResult<Option<Workspace>>;

    /// Create a new workspace.
    async fn create(&self, data: &CreateWorkspace) -> AppResult<Workspace>;
}

/// Store for location rows and their path hierarchy.
#[async_trait]
pub trait LocationStore: Send + Sync + 'static {
    /// Find a non-deleted location by ID within a workspace.
    async fn find_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
    ) -> AppResult<Option<Location>>;

    /// Find a non-deleted location by exact path within a workspace.
    async fn find_by_path(
        &self,
        workspace_id: WorkspaceId,
        path: &str,
    ) -> AppResult<Option<Location>>;

    /// List locations directly below the anchor.
    async fn find_top_level(&self, workspace_id: WorkspaceId) -> AppResult<Vec<Location>>;

    /// List direct children of the given path.
    async fn find_children(
        &self,
        workspace_id: WorkspaceId,
        parent_path: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Location>>;

    /// List all descendants of the given path (any depth), ordered by path.
    async fn find_descendants(
        &self,
        workspace_id: WorkspaceId,
        path: &str,
    ) -> AppResult<Vec<Location>>;

    /// Insert a new location.
    ///
    /// Fails with a conflict error when a non-deleted sibling already
    /// holds the same path.
    async fn insert(&self, data: &NewLocation) -> AppResult<Location>;

    /// Update name/description without touching the path.
    ///
    /// `description = None` leaves the stored description unchanged.
    async fn update_details(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Location>;

    /// Rename a location and rewrite every descendant's path prefix.
    ///
    /// The node's own update and the descendant rewrites are a single
    /// atomic unit: either the whole subtree carries the new prefix
    /// afterwards, or nothing changed. A path collision fails with a
    /// conflict error.
    async fn rename_with_cascade(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
        new_name: &str,
        new_description: Option<&str>,
        old_path: &str,
        new_path: &str,
    ) -> AppResult<Location>;

    /// Soft-delete a location and all of its descendants atomically.
    ///
    /// Returns the number of rows marked deleted.
    async fn soft_delete_subtree(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
        path: &str,
    ) -> AppResult<u64>;
}

/// Store for item rows.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// Find a non-deleted item by ID within a workspace.
    async fn find_by_id(&self, workspace_id: WorkspaceId, id: ItemId) -> AppResult<Option<Item>>;

    /// List items placed directly in a location.
    async fn find_by_location(
        &self,
        workspace_id: WorkspaceId,
        location_id: LocationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>>;

    /// List items placed anywhere under a path (the location itself and
    /// all descendants).
    async fn find_in_subtree(
        &self,
        workspace_id: WorkspaceId,
        path: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>>;

    /// Count items per location for the given set of locations.
    async fn count_by_locations(
        &self,
        workspace_id: WorkspaceId,
        location_ids: &[LocationId],
    ) -> AppResult<HashMap<LocationId, u64>>;

    /// Insert a new item.
    async fn insert(&self, data: &NewItem) -> AppResult<Item>;

    /// Update name/description.
    ///
    /// `description = None` leaves the stored description unchanged.
    async fn update_details(
        &self,
        workspace_id: WorkspaceId,
        id: ItemId,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Item>;

    /// Move an item into a location, or unassign it with `None`.
    async fn set_location(
        &self,
        workspace_id: WorkspaceId,
        id: ItemId,
        location_id: Option<LocationId>,
    ) -> AppResult<Item>;

    /// Soft-delete an item. Returns `true` if a row was marked.
    async fn soft_delete(&self, workspace_id: WorkspaceId, id: ItemId) -> AppResult<bool>;
}
