//! Location repository implementation.
//!
//! All reads go through the `active_locations` view so soft-deleted rows
//! are excluded in one place; writes address the base table.

use async_trait::async_trait;
use sqlx::PgPool;

use boxhub_core::error::{AppError, ErrorKind};
use boxhub_core::result::AppResult;
use boxhub_core::types::{LocationId, PageRequest, PageResponse, WorkspaceId};
use boxhub_entity::location::{Location, NewLocation, path};
use boxhub_entity::store::LocationStore;

use super::{descendant_pattern, grandchild_pattern};

/// Partial unique index guarding `(workspace_id, path)` on non-deleted rows.
const PATH_UNIQUE_CONSTRAINT: &str = "locations_workspace_id_path_key";

/// Repository for location CRUD and hierarchy queries.
#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    /// Create a new location repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write error, surfacing the path uniqueness violation as a
/// conflict rather than an opaque database error.
fn map_path_conflict(candidate_path: &str, context: &str, e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some(PATH_UNIQUE_CONSTRAINT) =>
        {
            AppError::conflict(format!("Location path '{candidate_path}' already exists"))
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), e),
    }
}

#[async_trait]
impl LocationStore for LocationRepository {
    async fn find_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
    ) -> AppResult<Option<Location>> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM active_locations WHERE workspace_id = $1 AND id = $2",
        )
        .bind(workspace_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find location", e))
    }

    async fn find_by_path(
        &self,
        workspace_id: WorkspaceId,
        path: &str,
    ) -> AppResult<Option<Location>> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM active_locations WHERE workspace_id = $1 AND path = $2",
        )
        .bind(workspace_id)
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find location by path", e)
        })
    }

    async fn find_top_level(&self, workspace_id: WorkspaceId) -> AppResult<Vec<Location>> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM active_locations \
             WHERE workspace_id = $1 AND path LIKE $2 AND path NOT LIKE $3 \
             ORDER BY name ASC",
        )
        .bind(workspace_id)
        .bind(descendant_pattern(path::PATH_ANCHOR))
        .bind(grandchild_pattern(path::PATH_ANCHOR))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list top-level locations", e)
        })
    }

    async fn find_children(
        &self,
        workspace_id: WorkspaceId,
        parent_path: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Location>> {
        let child_pattern = descendant_pattern(parent_path);
        let deeper_pattern = grandchild_pattern(parent_path);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM active_locations \
             WHERE workspace_id = $1 AND path LIKE $2 AND path NOT LIKE $3",
        )
        .bind(workspace_id)
        .bind(&child_pattern)
        .bind(&deeper_pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count children", e))?;

        let locations = sqlx::query_as::<_, Location>(
            "SELECT * FROM active_locations \
             WHERE workspace_id = $1 AND path LIKE $2 AND path NOT LIKE $3 \
             ORDER BY name ASC LIMIT $4 OFFSET $5",
        )
        .bind(workspace_id)
        .bind(&child_pattern)
        .bind(&deeper_pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))?;

        Ok(PageResponse::new(
            locations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_descendants(
        &self,
        workspace_id: WorkspaceId,
        path: &str,
    ) -> AppResult<Vec<Location>> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM active_locations \
             WHERE workspace_id = $1 AND path LIKE $2 \
             ORDER BY path ASC",
        )
        .bind(workspace_id)
        .bind(descendant_pattern(path))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))
    }

    async fn insert(&self, data: &NewLocation) -> AppResult<Location> {
        sqlx::query_as::<_, Location>(
            "INSERT INTO locations (workspace_id, name, description, path) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.workspace_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_path_conflict(&data.path, "Failed to create location", e))
    }

    async fn update_details(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Location> {
        sqlx::query_as::<_, Location>(
            "UPDATE locations \
             SET name = $3, description = COALESCE($4, description), updated_at = NOW() \
             WHERE workspace_id = $1 AND id = $2 AND NOT is_deleted RETURNING *",
        )
        .bind(workspace_id)
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update location", e))?
        .ok_or_else(|| AppError::not_found(format!("Location {id} not found")))
    }

    async fn rename_with_cascade(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
        new_name: &str,
        new_description: Option<&str>,
        old_path: &str,
        new_path: &str,
    ) -> AppResult<Location> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let renamed = sqlx::query_as::<_, Location>(
            "UPDATE locations \
             SET name = $3, description = COALESCE($4, description), path = $5, \
                 updated_at = NOW() \
             WHERE workspace_id = $1 AND id = $2 AND NOT is_deleted RETURNING *",
        )
        .bind(workspace_id)
        .bind(id)
        .bind(new_name)
        .bind(new_description)
        .bind(new_path)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_path_conflict(new_path, "Failed to rename location", e))?
        .ok_or_else(|| AppError::not_found(format!("Location {id} not found")))?;

        // Replace the old prefix on every descendant, leaving the suffix
        // untouched. Dropping the transaction on error rolls everything back.
        sqlx::query(
            "UPDATE locations \
             SET path = $3 || substr(path, char_length($2) + 1), updated_at = NOW() \
             WHERE workspace_id = $1 AND path LIKE $4 AND NOT is_deleted",
        )
        .bind(workspace_id)
        .bind(old_path)
        .bind(new_path)
        .bind(descendant_pattern(old_path))
        .execute(&mut *tx)
        .await
        .map_err(|e| map_path_conflict(new_path, "Failed to rewrite descendant paths", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit rename", e)
        })?;

        Ok(renamed)
    }

    async fn soft_delete_subtree(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
        path: &str,
    ) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let node = sqlx::query(
            "UPDATE locations SET is_deleted = TRUE, updated_at = NOW() \
             WHERE workspace_id = $1 AND id = $2 AND NOT is_deleted",
        )
        .bind(workspace_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete location", e))?;

        if node.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Location {id} not found")));
        }

        let descendants = sqlx::query(
            "UPDATE locations SET is_deleted = TRUE, updated_at = NOW() \
             WHERE workspace_id = $1 AND path LIKE $2 AND NOT is_deleted",
        )
        .bind(workspace_id)
        .bind(descendant_pattern(path))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete descendants", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit delete", e)
        })?;

        Ok(node.rows_affected() + descendants.rows_affected())
    }
}
