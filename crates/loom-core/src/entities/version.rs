use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a project's file set.
///
/// `version_number` is a valid semantic version, unique within the project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Version {
    pub id: String,
    pub project_id: String,
    pub version_number: String,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// A file copied into a version at snapshot time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VersionFile {
    pub path: String,
    pub content: String,
}
