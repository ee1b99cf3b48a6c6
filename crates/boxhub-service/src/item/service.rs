//! Item CRUD and placement.
//!
//! Items are the physical boxes being tracked. Placement is a reference to
//! a location; "everything under this shelf" queries resolve through the
//! location's materialized path.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use boxhub_core::error::AppError;
use boxhub_core::result::AppResult;
use boxhub_core::types::{ItemId, LocationId, PageRequest, PageResponse};
use boxhub_entity::item::{Item, NewItem};
use boxhub_entity::location::Location;
use boxhub_entity::store::{ItemStore, LocationStore};

use crate::context::RequestContext;

/// Manages items and their placement in locations.
#[derive(Clone)]
pub struct ItemService {
    /// Item store.
    items: Arc<dyn ItemStore>,
    /// Location store, for placement checks.
    locations: Arc<dyn LocationStore>,
}

/// Request to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    /// Display name (1-255 characters).
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Optional description of the contents.
    pub description: Option<String>,
    /// Initial placement (None = unassigned).
    pub location_id: Option<LocationId>,
}

/// Request to update an item. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    /// New display name (1-255 characters).
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(items: Arc<dyn ItemStore>, locations: Arc<dyn LocationStore>) -> Self {
        Self { items, locations }
    }

    /// Gets an item by ID.
    pub async fn get_item(&self, ctx: &RequestContext, item_id: ItemId) -> AppResult<Item> {
        self.items
            .find_by_id(ctx.workspace_id, item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))
    }

    /// Creates a new item.
    pub async fn create_item(
        &self,
        ctx: &RequestContext,
        req: CreateItemRequest,
    ) -> AppResult<Item> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid item payload: {e}")))?;

        if let Some(location_id) = req.location_id {
            self.require_location(ctx, location_id).await?;
        }

        let item = self
            .items
            .insert(&NewItem {
                workspace_id: ctx.workspace_id,
                location_id: req.location_id,
                name: req.name,
                description: req.description,
            })
            .await?;

        info!(
            workspace_id = %ctx.workspace_id,
            actor_id = %ctx.actor_id,
            item_id = %item.id,
            "Item created"
        );

        Ok(item)
    }

    /// Updates an item's name and/or description.
    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        item_id: ItemId,
        req: UpdateItemRequest,
    ) -> AppResult<Item> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid item payload: {e}")))?;

        let item = self.get_item(ctx, item_id).await?;
        let name = req.name.unwrap_or(item.name);

        self.items
            .update_details(ctx.workspace_id, item_id, &name, req.description.as_deref())
            .await
    }

    /// Moves an item into a location, or unassigns it with `None`.
    pub async fn move_item(
        &self,
        ctx: &RequestContext,
        item_id: ItemId,
        location_id: Option<LocationId>,
    ) -> AppResult<Item> {
        self.get_item(ctx, item_id).await?;

        if let Some(target) = location_id {
            self.require_location(ctx, target).await?;
        }

        let item = self
            .items
            .set_location(ctx.workspace_id, item_id, location_id)
            .await?;

        info!(
            workspace_id = %ctx.workspace_id,
            actor_id = %ctx.actor_id,
            item_id = %item_id,
            location_id = ?location_id,
            "Item moved"
        );

        Ok(item)
    }

    /// Lists items placed directly in a location.
    pub async fn list_in_location(
        &self,
        ctx: &RequestContext,
        location_id: LocationId,
        page: PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        self.require_location(ctx, location_id).await?;
        self.items
            .find_by_location(ctx.workspace_id, location_id, &page)
            .await
    }

    /// Lists items in a location and everything nested below it.
    pub async fn list_under(
        &self,
        ctx: &RequestContext,
        location_id: LocationId,
        page: PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        let location = self.require_location(ctx, location_id).await?;
        self.items
            .find_in_subtree(ctx.workspace_id, &location.path, &page)
            .await
    }

    /// Soft-deletes an item.
    pub async fn delete_item(&self, ctx: &RequestContext, item_id: ItemId) -> AppResult<()> {
        let removed = self.items.soft_delete(ctx.workspace_id, item_id).await?;
        if !removed {
            return Err(AppError::not_found("Item not found"));
        }

        info!(
            workspace_id = %ctx.workspace_id,
            actor_id = %ctx.actor_id,
            item_id = %item_id,
            "Item deleted"
        );

        Ok(())
    }

    async fn require_location(
        &self,
        ctx: &RequestContext,
        location_id: LocationId,
    ) -> AppResult<Location> {
        self.locations
            .find_by_id(ctx.workspace_id, location_id)
            .await?
            .ok_or_else(|| AppError::not_found("Location not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::service::{CreateLocationRequest, LocationService};
    use crate::testing::MemoryStore;
    use boxhub_core::error::ErrorKind;
    use boxhub_core::types::UserId;
    use boxhub_entity::store::WorkspaceStore;
    use boxhub_entity::workspace::CreateWorkspace;

    async fn setup() -> (ItemService, LocationService, RequestContext) {
        let store = Arc::new(MemoryStore::new());
        let workspace = store
            .create(&CreateWorkspace {
                name: "Home".to_string(),
            })
            .await
            .expect("workspace");
        let ctx = RequestContext::new(workspace.id, UserId::new());
        let items = ItemService::new(store.clone(), store.clone());
        let locations = LocationService::new(store.clone(), store.clone());
        (items, locations, ctx)
    }

    async fn create_location(
        service: &LocationService,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<LocationId>,
    ) -> Location {
        service
            .create_location(
                ctx,
                CreateLocationRequest {
                    name: name.to_string(),
                    description: None,
                    parent_id,
                },
            )
            .await
            .expect("create location")
    }

    async fn create_item(
        service: &ItemService,
        ctx: &RequestContext,
        name: &str,
        location_id: Option<LocationId>,
    ) -> Item {
        service
            .create_item(
                ctx,
                CreateItemRequest {
                    name: name.to_string(),
                    description: None,
                    location_id,
                },
            )
            .await
            .expect("create item")
    }

    #[tokio::test]
    async fn test_create_item_in_location() {
        let (items, locations, ctx) = setup().await;
        let garage = create_location(&locations, &ctx, "Garage", None).await;

        let item = create_item(&items, &ctx, "Winter Tires", Some(garage.id)).await;

        assert!(item.is_assigned());
        assert_eq!(item.location_id, Some(garage.id));
    }

    #[tokio::test]
    async fn test_create_item_rejects_missing_location() {
        let (items, _locations, ctx) = setup().await;

        let err = items
            .create_item(
                &ctx,
                CreateItemRequest {
                    name: "Winter Tires".to_string(),
                    description: None,
                    location_id: Some(LocationId::new()),
                },
            )
            .await
            .expect_err("should fail");

        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_under_spans_the_subtree() {
        let (items, locations, ctx) = setup().await;
        let garage = create_location(&locations, &ctx, "Garage", None).await;
        let shelf = create_location(&locations, &ctx, "Shelf A", Some(garage.id)).await;
        let attic = create_location(&locations, &ctx, "Attic", None).await;

        create_item(&items, &ctx, "Drill", Some(garage.id)).await;
        create_item(&items, &ctx, "Sander", Some(shelf.id)).await;
        create_item(&items, &ctx, "Skis", Some(attic.id)).await;

        let under_garage = items
            .list_under(&ctx, garage.id, PageRequest::default())
            .await
            .expect("list");

        assert_eq!(under_garage.total_items, 2);
        let names: Vec<&str> = under_garage.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Drill", "Sander"]);

        let in_garage = items
            .list_in_location(&ctx, garage.id, PageRequest::default())
            .await
            .expect("list");
        assert_eq!(in_garage.total_items, 1);
    }

    #[tokio::test]
    async fn test_move_item_between_locations_and_unassign() {
        let (items, locations, ctx) = setup().await;
        let garage = create_location(&locations, &ctx, "Garage", None).await;
        let attic = create_location(&locations, &ctx, "Attic", None).await;
        let item = create_item(&items, &ctx, "Skis", Some(garage.id)).await;

        let moved = items
            .move_item(&ctx, item.id, Some(attic.id))
            .await
            .expect("move");
        assert_eq!(moved.location_id, Some(attic.id));

        let unassigned = items.move_item(&ctx, item.id, None).await.expect("move");
        assert!(!unassigned.is_assigned());
    }

    #[tokio::test]
    async fn test_move_item_rejects_missing_target() {
        let (items, locations, ctx) = setup().await;
        let garage = create_location(&locations, &ctx, "Garage", None).await;
        let item = create_item(&items, &ctx, "Skis", Some(garage.id)).await;

        let err = items
            .move_item(&ctx, item.id, Some(LocationId::new()))
            .await
            .expect_err("should fail");

        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_item_hides_it() {
        let (items, locations, ctx) = setup().await;
        let garage = create_location(&locations, &ctx, "Garage", None).await;
        let item = create_item(&items, &ctx, "Skis", Some(garage.id)).await;

        items.delete_item(&ctx, item.id).await.expect("delete");

        let err = items.get_item(&ctx, item.id).await.expect_err("hidden");
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = items.delete_item(&ctx, item.id).await.expect_err("again");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_item_details() {
        let (items, locations, ctx) = setup().await;
        let garage = create_location(&locations, &ctx, "Garage", None).await;
        let item = create_item(&items, &ctx, "Box 12", Some(garage.id)).await;

        let updated = items
            .update_item(
                &ctx,
                item.id,
                UpdateItemRequest {
                    name: None,
                    description: Some("Holiday decorations".to_string()),
                },
            )
            .await
            .expect("update");

        assert_eq!(updated.name, "Box 12");
        assert_eq!(updated.description.as_deref(), Some("Holiday decorations"));
    }
}
