//! Request context carrying the tenant scope and the acting user.

use boxhub_core::types::{UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current request.
///
/// Constructed by the calling layer and passed into every service method,
/// so each operation knows *which workspace* it is scoped to and *who* is
/// acting. Tenant scope is always an explicit parameter; the services hold
/// no ambient request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The workspace every operation in this request is scoped to.
    pub workspace_id: WorkspaceId,
    /// The acting user's ID.
    pub actor_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(workspace_id: WorkspaceId, actor_id: UserId) -> Self {
        Self {
            workspace_id,
            actor_id,
            request_time: Utc::now(),
        }
    }
}
