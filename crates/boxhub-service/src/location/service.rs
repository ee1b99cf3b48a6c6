//! Location CRUD and hierarchy mutation.
//!
//! `LocationService` owns the invariants of the location tree: labels are
//! normalized before they become path segments, nesting is depth-limited,
//! and no two non-deleted siblings in a workspace share a path. The store
//! enforces path uniqueness again at write time, so a racing create or
//! rename loses with the same conflict error the pre-check produces.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use boxhub_core::error::AppError;
use boxhub_core::result::AppResult;
use boxhub_core::types::{LocationId, PageRequest, PageResponse};
use boxhub_entity::location::{Location, NewLocation, path};
use boxhub_entity::store::{LocationStore, WorkspaceStore};

use crate::context::RequestContext;

/// Manages location creation, rename, deletion, and hierarchy queries.
#[derive(Clone)]
pub struct LocationService {
    /// Location store.
    locations: Arc<dyn LocationStore>,
    /// Workspace store.
    workspaces: Arc<dyn WorkspaceStore>,
}

/// Request to create a new location.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLocationRequest {
    /// Display name (1-255 characters).
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent location (None for top-level).
    pub parent_id: Option<LocationId>,
}

/// Request to update a location. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    /// New display name (1-255 characters).
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl LocationService {
    /// Creates a new location service.
    pub fn new(locations: Arc<dyn LocationStore>, workspaces: Arc<dyn WorkspaceStore>) -> Self {
        Self {
            locations,
            workspaces,
        }
    }

    /// Gets a location by ID.
    pub async fn get_location(
        &self,
        ctx: &RequestContext,
        location_id: LocationId,
    ) -> AppResult<Location> {
        self.locations
            .find_by_id(ctx.workspace_id, location_id)
            .await?
            .ok_or_else(|| AppError::not_found("Location not found"))
    }

    /// Lists locations directly below the anchor.
    pub async fn list_top_level(&self, ctx: &RequestContext) -> AppResult<Vec<Location>> {
        self.locations.find_top_level(ctx.workspace_id).await
    }

    /// Lists direct children of a location.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        parent_id: LocationId,
        page: PageRequest,
    ) -> AppResult<PageResponse<Location>> {
        let parent = self.get_location(ctx, parent_id).await?;
        self.locations
            .find_children(ctx.workspace_id, &parent.path, &page)
            .await
    }

    /// Derives the parent location from the path.
    ///
    /// Returns `None` for top-level locations; the anchor segment itself is
    /// never a row.
    pub async fn parent_of(
        &self,
        ctx: &RequestContext,
        location: &Location,
    ) -> AppResult<Option<Location>> {
        let parent = location.parent_path();
        if parent.is_empty() || parent == path::PATH_ANCHOR {
            return Ok(None);
        }
        self.locations.find_by_path(ctx.workspace_id, parent).await
    }

    /// Creates a new location.
    pub async fn create_location(
        &self,
        ctx: &RequestContext,
        req: CreateLocationRequest,
    ) -> AppResult<Location> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid location payload: {e}")))?;

        let label = path::normalize_label(&req.name);
        if label.is_empty() {
            return Err(AppError::validation(
                "Location name has no usable characters",
            ));
        }

        self.workspaces
            .find_by_id(ctx.workspace_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workspace not found"))?;

        let parent = match req.parent_id {
            Some(parent_id) => Some(
                self.locations
                    .find_by_id(ctx.workspace_id, parent_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent location not found"))?,
            ),
            None => None,
        };

        let candidate = path::build_path(parent.as_ref().map(|p| p.path.as_str()), &label);

        if path::depth(&candidate) > path::MAX_PATH_DEPTH {
            return Err(AppError::depth_exceeded(format!(
                "Locations can be nested at most {} levels deep",
                path::MAX_PATH_DEPTH - 1
            )));
        }

        // Advisory pre-check; the store's uniqueness constraint is the
        // authoritative guard under concurrency.
        if self
            .locations
            .find_by_path(ctx.workspace_id, &candidate)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "A sibling location with the name '{label}' already exists"
            )));
        }

        let location = self
            .locations
            .insert(&NewLocation {
                workspace_id: ctx.workspace_id,
                name: req.name,
                description: req.description,
                path: candidate,
            })
            .await?;

        info!(
            workspace_id = %ctx.workspace_id,
            actor_id = %ctx.actor_id,
            location_id = %location.id,
            path = %location.path,
            "Location created"
        );

        Ok(location)
    }

    /// Updates a location's name and/or description.
    ///
    /// A name change regenerates the path's final segment and rewrites
    /// every descendant's prefix.
    pub async fn update_location(
        &self,
        ctx: &RequestContext,
        location_id: LocationId,
        req: UpdateLocationRequest,
    ) -> AppResult<Location> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid location payload: {e}")))?;

        let location = self.get_location(ctx, location_id).await?;

        match req.name {
            Some(ref new_name) if *new_name != location.name => {
                self.rename(ctx, &location, new_name, req.description.as_deref())
                    .await
            }
            _ => {
                self.locations
                    .update_details(
                        ctx.workspace_id,
                        location_id,
                        &location.name,
                        req.description.as_deref(),
                    )
                    .await
            }
        }
    }

    /// Soft-deletes a location and its entire subtree.
    ///
    /// Returns the number of locations removed from active views.
    pub async fn delete_location(
        &self,
        ctx: &RequestContext,
        location_id: LocationId,
    ) -> AppResult<u64> {
        let location = self.get_location(ctx, location_id).await?;

        let removed = self
            .locations
            .soft_delete_subtree(ctx.workspace_id, location_id, &location.path)
            .await?;

        info!(
            workspace_id = %ctx.workspace_id,
            actor_id = %ctx.actor_id,
            location_id = %location_id,
            path = %location.path,
            removed,
            "Location subtree deleted"
        );

        Ok(removed)
    }

    async fn rename(
        &self,
        ctx: &RequestContext,
        location: &Location,
        new_name: &str,
        new_description: Option<&str>,
    ) -> AppResult<Location> {
        let label = path::normalize_label(new_name);
        if label.is_empty() {
            return Err(AppError::validation(
                "Location name has no usable characters",
            ));
        }

        let new_path = path::regenerate_path(&location.path, new_name);

        // Same label after normalization: cosmetic rename, no path work.
        if new_path == location.path {
            return self
                .locations
                .update_details(ctx.workspace_id, location.id, new_name, new_description)
                .await;
        }

        if let Some(existing) = self
            .locations
            .find_by_path(ctx.workspace_id, &new_path)
            .await?
        {
            if existing.id != location.id {
                return Err(AppError::conflict(format!(
                    "A sibling location with the name '{label}' already exists"
                )));
            }
        }

        let renamed = self
            .locations
            .rename_with_cascade(
                ctx.workspace_id,
                location.id,
                new_name,
                new_description,
                &location.path,
                &new_path,
            )
            .await?;

        info!(
            workspace_id = %ctx.workspace_id,
            actor_id = %ctx.actor_id,
            location_id = %location.id,
            old_path = %location.path,
            new_path = %renamed.path,
            "Location renamed"
        );

        Ok(renamed)
    }
}
