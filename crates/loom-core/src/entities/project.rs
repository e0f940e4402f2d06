use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FileKind;
use crate::plan::Plan;

/// Path to content, ordered by path.
pub type FileSet = BTreeMap<String, String>;

/// A generated project. Exactly one owner; owns its file set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Project {
    pub id: String,
    pub description: String,
    /// Free-form project type tag, e.g. `web`.
    pub project_type: String,
    /// The analysis-stage plan, stored verbatim.
    pub structure: Plan,
    /// Generative model that produced the project.
    pub model: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One file of a project's current file set. Paths are unique per project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectFile {
    pub project_id: String,
    pub path: String,
    pub content: String,
    pub kind: FileKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project together with its current file set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub files: Vec<ProjectFile>,
}

/// Self-contained backup of a project and its files.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectExport {
    pub id: String,
    pub description: String,
    pub project_type: String,
    pub structure: Plan,
    pub created_at: DateTime<Utc>,
    pub files: Vec<ExportedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportedFile {
    pub path: String,
    pub content: String,
    pub kind: FileKind,
}

impl From<ProjectDetail> for ProjectExport {
    fn from(detail: ProjectDetail) -> Self {
        let ProjectDetail { project, files } = detail;
        Self {
            id: project.id,
            description: project.description,
            project_type: project.project_type,
            structure: project.structure,
            created_at: project.created_at,
            files: files
                .into_iter()
                .map(|f| ExportedFile {
                    path: f.path,
                    content: f.content,
                    kind: f.kind,
                })
                .collect(),
        }
    }
}
