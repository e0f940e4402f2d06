use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Permission;

/// Authorization record: `user_id` holds `permission` on `project_id`.
///
/// Unique per `(project_id, user_id)`; re-sharing overwrites the level.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ShareGrant {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub permission: Permission,
    pub created_at: DateTime<Utc>,
}
