//! Workspace repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use boxhub_core::error::{AppError, ErrorKind};
use boxhub_core::result::AppResult;
use boxhub_core::types::WorkspaceId;
use boxhub_entity::store::WorkspaceStore;
use boxhub_entity::workspace::{CreateWorkspace, Workspace};

/// Repository for workspace rows.
#[derive(Debug, Clone)]
pub struct WorkspaceRepository {
    pool: PgPool,
}

impl WorkspaceRepository {
    /// Create a new workspace repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceStore for WorkspaceRepository {
    async fn find_by_id(&self, id: WorkspaceId) -> AppResult<Option<Workspace>> {
        sqlx::query_as::<_, Workspace>("SELECT * FROM workspaces WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find workspace", e))
    }

    async fn create(&self, data: &CreateWorkspace) -> AppResult<Workspace> {
        sqlx::query_as::<_, Workspace>("INSERT INTO workspaces (name) VALUES ($1) RETURNING *")
            .bind(&data.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create workspace", e)
            })
    }
}
