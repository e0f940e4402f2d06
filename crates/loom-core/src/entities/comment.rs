use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A discussion thread on a project, optionally anchored to a file and line.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub project_id: String,
    pub author_id: String,
    pub content: String,
    pub file_path: Option<String>,
    pub line_number: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Replies in creation order.
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Reply {
    pub id: String,
    pub comment_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
