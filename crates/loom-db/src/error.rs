//! Database error types for loom-db.

use loom_core::errors::ErrorCategory;
use thiserror::Error;

/// Errors from storage operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// An entity ID did not resolve.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The actor failed an access or owner/admin check.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A version number is not a valid semantic version.
    #[error("Invalid version number '{version}': {reason} (expected semantic versioning, e.g. 1.0.0)")]
    InvalidVersionFormat { version: String, reason: String },

    /// A version number already exists within the project.
    #[error("Version {version} already exists for project {project_id}")]
    DuplicateVersion { project_id: String, version: String },

    /// Input failed validation (duplicate email/handle, empty content).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Forbidden(_) => ErrorCategory::Forbidden,
            Self::InvalidVersionFormat { .. } | Self::DuplicateVersion { .. } | Self::Validation(_) => {
                ErrorCategory::Validation
            }
            Self::Query(_)
            | Self::Migration(_)
            | Self::NoResult
            | Self::InvalidState(_)
            | Self::LibSql(_)
            | Self::Other(_) => ErrorCategory::Storage,
        }
    }
}
