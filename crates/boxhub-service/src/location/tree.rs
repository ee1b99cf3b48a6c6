//! Location tree assembly and breadcrumb resolution.

use std::collections::HashMap;
use std::sync::Arc;

use boxhub_core::error::AppError;
use boxhub_core::result::AppResult;
use boxhub_core::types::LocationId;
use boxhub_entity::location::{Location, LocationNode, path};
use boxhub_entity::store::{ItemStore, LocationStore};

use crate::context::RequestContext;

/// Builds location trees and breadcrumb trails.
#[derive(Clone)]
pub struct TreeService {
    /// Location store.
    locations: Arc<dyn LocationStore>,
    /// Item store, for per-location item counts.
    items: Arc<dyn ItemStore>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(locations: Arc<dyn LocationStore>, items: Arc<dyn ItemStore>) -> Self {
        Self { locations, items }
    }

    /// Builds the nested tree rooted at a location.
    pub async fn get_tree(
        &self,
        ctx: &RequestContext,
        location_id: LocationId,
    ) -> AppResult<LocationNode> {
        let root = self
            .locations
            .find_by_id(ctx.workspace_id, location_id)
            .await?
            .ok_or_else(|| AppError::not_found("Location not found"))?;

        let descendants = self
            .locations
            .find_descendants(ctx.workspace_id, &root.path)
            .await?;

        let mut ids: Vec<LocationId> = vec![root.id];
        ids.extend(descendants.iter().map(|l| l.id));
        let item_counts = self
            .items
            .count_by_locations(ctx.workspace_id, &ids)
            .await?;

        Ok(build_node(root, &descendants, &item_counts))
    }

    /// The trail from the highest ancestor down to the location itself.
    ///
    /// Ancestors are the path's own prefixes; a missing ancestor row is
    /// skipped rather than failing the whole trail.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        location_id: LocationId,
    ) -> AppResult<Vec<Location>> {
        let location = self
            .locations
            .find_by_id(ctx.workspace_id, location_id)
            .await?
            .ok_or_else(|| AppError::not_found("Location not found"))?;

        let segments: Vec<&str> = location.path.split(path::PATH_SEPARATOR).collect();
        let mut trail = Vec::with_capacity(segments.len());
        for end in 2..segments.len() {
            let ancestor_path = segments[..end].join(".");
            if let Some(ancestor) = self
                .locations
                .find_by_path(ctx.workspace_id, &ancestor_path)
                .await?
            {
                trail.push(ancestor);
            }
        }
        trail.push(location);

        Ok(trail)
    }
}

/// Assembles a node and its children from the flat descendant list.
fn build_node(
    location: Location,
    descendants: &[Location],
    item_counts: &HashMap<LocationId, u64>,
) -> LocationNode {
    let children: Vec<LocationNode> = descendants
        .iter()
        .filter(|candidate| path::parent_path(&candidate.path) == location.path)
        .map(|child| build_node(child.clone(), descendants, item_counts))
        .collect();

    LocationNode {
        id: location.id,
        name: location.name,
        path: location.path,
        child_count: children.len() as u64,
        item_count: item_counts.get(&location.id).copied().unwrap_or(0),
        children,
    }
}
