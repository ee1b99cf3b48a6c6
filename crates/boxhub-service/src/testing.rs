//! In-memory store doubles for service tests.
//!
//! The doubles enforce the same `(workspace_id, path)` uniqueness rule as
//! the database's partial unique index, so conflict-backstop behavior is
//! exercised without PostgreSQL.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use boxhub_core::error::AppError;
use boxhub_core::result::AppResult;
use boxhub_core::types::{ItemId, LocationId, PageRequest, PageResponse, WorkspaceId};
use boxhub_entity::item::{Item, NewItem};
use boxhub_entity::location::{Location, NewLocation, path};
use boxhub_entity::store::{ItemStore, LocationStore, WorkspaceStore};
use boxhub_entity::workspace::{CreateWorkspace, Workspace};

/// In-memory implementation of every store trait.
pub(crate) struct MemoryStore {
    workspaces: Mutex<Vec<Workspace>>,
    locations: Mutex<Vec<Location>>,
    items: Mutex<Vec<Item>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            workspaces: Mutex::new(Vec::new()),
            locations: Mutex::new(Vec::new()),
            items: Mutex::new(Vec::new()),
        }
    }
}

fn paginate<T: Clone + serde::Serialize>(rows: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = rows.len() as u64;
    let start = (page.offset() as usize).min(rows.len());
    let end = (start + page.limit() as usize).min(rows.len());
    PageResponse::new(rows[start..end].to_vec(), page.page, page.page_size, total)
}

#[async_trait]
impl WorkspaceStore for MemoryStore {
    async fn find_by_id(&self, id: WorkspaceId) -> AppResult<Option<Workspace>> {
        let workspaces = self.workspaces.lock().expect("lock");
        Ok(workspaces.iter().find(|w| w.id == id).cloned())
    }

    async fn create(&self, data: &CreateWorkspace) -> AppResult<Workspace> {
        let now = Utc::now();
        let workspace = Workspace {
            id: WorkspaceId::new(),
            name: data.name.clone(),
            created_at: now,
            updated_at: now,
        };
        self.workspaces
            .lock()
            .expect("lock")
            .push(workspace.clone());
        Ok(workspace)
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn find_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
    ) -> AppResult<Option<Location>> {
        let locations = self.locations.lock().expect("lock");
        Ok(locations
            .iter()
            .find(|l| l.workspace_id == workspace_id && l.id == id && !l.is_deleted)
            .cloned())
    }

    async fn find_by_path(
        &self,
        workspace_id: WorkspaceId,
        target: &str,
    ) -> AppResult<Option<Location>> {
        let locations = self.locations.lock().expect("lock");
        Ok(locations
            .iter()
            .find(|l| l.workspace_id == workspace_id && !l.is_deleted && l.path == target)
            .cloned())
    }

    async fn find_top_level(&self, workspace_id: WorkspaceId) -> AppResult<Vec<Location>> {
        let locations = self.locations.lock().expect("lock");
        let mut rows: Vec<Location> = locations
            .iter()
            .filter(|l| l.workspace_id == workspace_id && !l.is_deleted && l.is_top_level())
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_children(
        &self,
        workspace_id: WorkspaceId,
        parent_path: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Location>> {
        let locations = self.locations.lock().expect("lock");
        let mut rows: Vec<Location> = locations
            .iter()
            .filter(|l| {
                l.workspace_id == workspace_id
                    && !l.is_deleted
                    && path::parent_path(&l.path) == parent_path
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(rows, page))
    }

    async fn find_descendants(
        &self,
        workspace_id: WorkspaceId,
        target: &str,
    ) -> AppResult<Vec<Location>> {
        let locations = self.locations.lock().expect("lock");
        let mut rows: Vec<Location> = locations
            .iter()
            .filter(|l| {
                l.workspace_id == workspace_id
                    && !l.is_deleted
                    && path::is_descendant(&l.path, target)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(rows)
    }

    async fn insert(&self, data: &NewLocation) -> AppResult<Location> {
        let mut locations = self.locations.lock().expect("lock");
        if locations
            .iter()
            .any(|l| l.workspace_id == data.workspace_id && !l.is_deleted && l.path == data.path)
        {
            return Err(AppError::conflict(format!(
                "Location path '{}' already exists",
                data.path
            )));
        }

        let now = Utc::now();
        let location = Location {
            id: LocationId::new(),
            workspace_id: data.workspace_id,
            name: data.name.clone(),
            description: data.description.clone(),
            path: data.path.clone(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        locations.push(location.clone());
        Ok(location)
    }

    async fn update_details(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Location> {
        let mut locations = self.locations.lock().expect("lock");
        let location = locations
            .iter_mut()
            .find(|l| l.workspace_id == workspace_id && l.id == id && !l.is_deleted)
            .ok_or_else(|| AppError::not_found(format!("Location {id} not found")))?;

        location.name = name.to_string();
        if let Some(d) = description {
            location.description = Some(d.to_string());
        }
        location.updated_at = Utc::now();
        Ok(location.clone())
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
        let mut locations = self.locations.lock().expect("lock");

        if locations.iter().any(|l| {
            l.workspace_id == workspace_id && !l.is_deleted && l.path == new_path && l.id != id
        }) {
            return Err(AppError::conflict(format!(
                "Location path '{new_path}' already exists"
            )));
        }

        let node = locations
            .iter_mut()
            .find(|l| l.workspace_id == workspace_id && l.id == id && !l.is_deleted)
            .ok_or_else(|| AppError::not_found(format!("Location {id} not found")))?;

        node.name = new_name.to_string();
        if let Some(d) = new_description {
            node.description = Some(d.to_string());
        }
        node.path = new_path.to_string();
        node.updated_at = Utc::now();
        let renamed = node.clone();

        for l in locations.iter_mut() {
            if l.workspace_id == workspace_id
                && !l.is_deleted
                && path::is_descendant(&l.path, old_path)
            {
                l.path = path::rewrite_prefix(&l.path, old_path, new_path);
                l.updated_at = Utc::now();
            }
        }

        Ok(renamed)
    }

    async fn soft_delete_subtree(
        &self,
        workspace_id: WorkspaceId,
        id: LocationId,
        target: &str,
    ) -> AppResult<u64> {
        let mut locations = self.locations.lock().expect("lock");

        if !locations
            .iter()
            .any(|l| l.workspace_id == workspace_id && l.id == id && !l.is_deleted)
        {
            return Err(AppError::not_found(format!("Location {id} not found")));
        }

        let mut removed = 0u64;
        for l in locations.iter_mut() {
            if l.workspace_id != workspace_id || l.is_deleted {
                continue;
            }
            if l.id == id || path::is_descendant(&l.path, target) {
                l.is_deleted = true;
                l.updated_at = Utc::now();
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn find_by_id(&self, workspace_id: WorkspaceId, id: ItemId) -> AppResult<Option<Item>> {
        let items = self.items.lock().expect("lock");
        Ok(items
            .iter()
            .find(|i| i.workspace_id == workspace_id && i.id == id && !i.is_deleted)
            .cloned())
    }

    async fn find_by_location(
        &self,
        workspace_id: WorkspaceId,
        location_id: LocationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        let items = self.items.lock().expect("lock");
        let mut rows: Vec<Item> = items
            .iter()
            .filter(|i| {
                i.workspace_id == workspace_id
                    && !i.is_deleted
                    && i.location_id == Some(location_id)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(rows, page))
    }

    async fn find_in_subtree(
        &self,
        workspace_id: WorkspaceId,
        target: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        let in_subtree: HashSet<LocationId> = {
            let locations = self.locations.lock().expect("lock");
            locations
                .iter()
                .filter(|l| {
                    l.workspace_id == workspace_id
                        && !l.is_deleted
                        && (l.path == target || path::is_descendant(&l.path, target))
                })
                .map(|l| l.id)
                .collect()
        };

        let items = self.items.lock().expect("lock");
        let mut rows: Vec<Item> = items
            .iter()
            .filter(|i| {
                i.workspace_id == workspace_id
                    && !i.is_deleted
                    && i.location_id.is_some_and(|lid| in_subtree.contains(&lid))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(rows, page))
    }

    async fn count_by_locations(
        &self,
        workspace_id: WorkspaceId,
        location_ids: &[LocationId],
    ) -> AppResult<HashMap<LocationId, u64>> {
        let wanted: HashSet<LocationId> = location_ids.iter().copied().collect();
        let items = self.items.lock().expect("lock");

        let mut counts = HashMap::new();
        for item in items.iter() {
            if item.workspace_id != workspace_id || item.is_deleted {
                continue;
            }
            if let Some(lid) = item.location_id {
                if wanted.contains(&lid) {
                    *counts.entry(lid).or_insert(0u64) += 1;
                }
            }
        }
        Ok(counts)
    }

    async fn insert(&self, data: &NewItem) -> AppResult<Item> {
        let now = Utc::now();
        let item = Item {
            id: ItemId::new(),
            workspace_id: data.workspace_id,
            location_id: data.location_id,
            name: data.name.clone(),
            description: data.description.clone(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.items.lock().expect("lock").push(item.clone());
        Ok(item)
    }

    async fn update_details(
        &self,
        workspace_id: WorkspaceId,
        id: ItemId,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Item> {
        let mut items = self.items.lock().expect("lock");
        let item = items
            .iter_mut()
            .find(|i| i.workspace_id == workspace_id && i.id == id && !i.is_deleted)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;

        item.name = name.to_string();
        if let Some(d) = description {
            item.description = Some(d.to_string());
        }
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn set_location(
        &self,
        workspace_id: WorkspaceId,
        id: ItemId,
        location_id: Option<LocationId>,
    ) -> AppResult<Item> {
        let mut items = self.items.lock().expect("lock");
        let item = items
            .iter_mut()
            .find(|i| i.workspace_id == workspace_id && i.id == id && !i.is_deleted)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;

        item.location_id = location_id;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn soft_delete(&self, workspace_id: WorkspaceId, id: ItemId) -> AppResult<bool> {
        let mut items = self.items.lock().expect("lock");
        match items
            .iter_mut()
            .find(|i| i.workspace_id == workspace_id && i.id == id && !i.is_deleted)
        {
            Some(item) => {
                item.is_deleted = true;
                item.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
