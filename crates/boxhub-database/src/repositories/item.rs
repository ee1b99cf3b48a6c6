//! Item repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use boxhub_core::error::{AppError, ErrorKind};
use boxhub_core::result::AppResult;
use boxhub_core::types::{ItemId, LocationId, PageRequest, PageResponse, WorkspaceId};
use boxhub_entity::item::{Item, NewItem};
use boxhub_entity::store::ItemStore;

use super::descendant_pattern;

/// Repository for item CRUD and placement queries.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn find_by_id(&self, workspace_id: WorkspaceId, id: ItemId) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM active_items WHERE workspace_id = $1 AND id = $2")
            .bind(workspace_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    async fn find_by_location(
        &self,
        workspace_id: WorkspaceId,
        location_id: LocationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM active_items WHERE workspace_id = $1 AND location_id = $2",
        )
        .bind(workspace_id)
        .bind(location_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count items", e))?;

        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM active_items \
             WHERE workspace_id = $1 AND location_id = $2 \
             ORDER BY name ASC LIMIT $3 OFFSET $4",
        )
        .bind(workspace_id)
        .bind(location_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_in_subtree(
        &self,
        workspace_id: WorkspaceId,
        path: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        let pattern = descendant_pattern(path);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM active_items i \
             JOIN active_locations l \
               ON l.id = i.location_id AND l.workspace_id = i.workspace_id \
             WHERE i.workspace_id = $1 AND (l.path = $2 OR l.path LIKE $3)",
        )
        .bind(workspace_id)
        .bind(path)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count subtree items", e)
        })?;

        let items = sqlx::query_as::<_, Item>(
            "SELECT i.* FROM active_items i \
             JOIN active_locations l \
               ON l.id = i.location_id AND l.workspace_id = i.workspace_id \
             WHERE i.workspace_id = $1 AND (l.path = $2 OR l.path LIKE $3) \
             ORDER BY i.name ASC LIMIT $4 OFFSET $5",
        )
        .bind(workspace_id)
        .bind(path)
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list subtree items", e)
        })?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn count_by_locations(
        &self,
        workspace_id: WorkspaceId,
        location_ids: &[LocationId],
    ) -> AppResult<HashMap<LocationId, u64>> {
        if location_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = location_ids.iter().map(|id| id.into_uuid()).collect();

        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT location_id, COUNT(*) FROM active_items \
             WHERE workspace_id = $1 AND location_id = ANY($2) \
             GROUP BY location_id",
        )
        .bind(workspace_id)
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count items", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (LocationId::from_uuid(id), count as u64))
            .collect())
    }

    async fn insert(&self, data: &NewItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (workspace_id, location_id, name, description) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.workspace_id)
        .bind(data.location_id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create item", e))
    }

    async fn update_details(
        &self,
        workspace_id: WorkspaceId,
        id: ItemId,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "UPDATE items \
             SET name = $3, description = COALESCE($4, description), updated_at = NOW() \
             WHERE workspace_id = $1 AND id = $2 AND NOT is_deleted RETURNING *",
        )
        .bind(workspace_id)
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn set_location(
        &self,
        workspace_id: WorkspaceId,
        id: ItemId,
        location_id: Option<LocationId>,
    ) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "UPDATE items SET location_id = $3, updated_at = NOW() \
             WHERE workspace_id = $1 AND id = $2 AND NOT is_deleted RETURNING *",
        )
        .bind(workspace_id)
        .bind(id)
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move item", e))?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn soft_delete(&self, workspace_id: WorkspaceId, id: ItemId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE items SET is_deleted = TRUE, updated_at = NOW() \
             WHERE workspace_id = $1 AND id = $2 AND NOT is_deleted",
        )
        .bind(workspace_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;

        Ok(result.rows_affected() > 0)
    }
}
