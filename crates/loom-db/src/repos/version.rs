//! Version ledger: immutable, uniquely numbered snapshots of a file set.
//!
//! Versions are append-only. There is no update or delete; they disappear
//! only when their project is deleted.

use loom_core::entities::{FileSet, Version, VersionFile};
use loom_core::enums::Permission;
use loom_core::identity::Actor;
use loom_core::ids::PREFIX_VERSION;

use crate::error::DatabaseError;
use crate::helpers::{finish, get_opt_string, is_unique_violation_on, now, parse_datetime, timestamp};
use crate::repos::access::check_access;
use crate::repos::project::fetch_files;
use crate::service::LoomService;

const SELECT_COLS: &str = "id, project_id, version_number, description, created_by, created_at";

/// The per-project uniqueness key, as `SQLite` names it in constraint errors.
const VERSION_KEY: &str = "project_versions.project_id, project_versions.version_number";

fn row_to_version(row: &libsql::Row) -> Result<Version, DatabaseError> {
    Ok(Version {
        id: row.get(0)?,
        project_id: row.get(1)?,
        version_number: row.get(2)?,
        description: get_opt_string(row, 3)?,
        created_by: row.get(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Reject anything that is not `major.minor.patch[-pre][+build]`.
fn validate_version_number(version_number: &str) -> Result<(), DatabaseError> {
    semver::Version::parse(version_number)
        .map(|_| ())
        .map_err(|e| DatabaseError::InvalidVersionFormat {
            version: version_number.to_string(),
            reason: e.to_string(),
        })
}

async fn fetch_version(
    conn: &libsql::Connection,
    version_id: &str,
) -> Result<Version, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM project_versions WHERE id = ?1"),
            [version_id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("version", version_id))?;
    row_to_version(&row)
}

async fn version_exists(
    conn: &libsql::Connection,
    project_id: &str,
    version_number: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT 1 FROM project_versions WHERE project_id = ?1 AND version_number = ?2",
            [project_id, version_number],
        )
        .await?;
    Ok(rows.next().await?.is_some())
}

/// Insert the version row and its files. Runs inside the caller's transaction.
async fn insert_version(
    conn: &libsql::Connection,
    version: &Version,
    files: &FileSet,
) -> Result<(), DatabaseError> {
    let duplicate = || DatabaseError::DuplicateVersion {
        project_id: version.project_id.clone(),
        version: version.version_number.clone(),
    };

    if version_exists(conn, &version.project_id, &version.version_number).await? {
        return Err(duplicate());
    }

    conn.execute(
        &format!("INSERT INTO project_versions ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        libsql::params![
            version.id.as_str(),
            version.project_id.as_str(),
            version.version_number.as_str(),
            version.description.as_deref(),
            version.created_by.as_str(),
            timestamp(&version.created_at)
        ],
    )
    .await
    .map_err(|e| {
        if is_unique_violation_on(&e, VERSION_KEY) {
            duplicate()
        } else {
            e.into()
        }
    })?;

    for (path, content) in files {
        conn.execute(
            "INSERT INTO version_files (version_id, path, content) VALUES (?1, ?2, ?3)",
            libsql::params![version.id.as_str(), path.as_str(), content.as_str()],
        )
        .await?;
    }
    Ok(())
}

impl LoomService {
    /// Record a new version holding exactly `files`.
    ///
    /// Requires write access. The number must be a semantic version unused
    /// within the project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidVersionFormat`, `DuplicateVersion`,
    /// `NotFound` or `Forbidden`. Nothing is written on failure.
    pub async fn create_version(
        &self,
        project_id: &str,
        version_number: &str,
        description: Option<&str>,
        actor: &Actor,
        files: &FileSet,
    ) -> Result<Version, DatabaseError> {
        validate_version_number(version_number)?;
        self.record_version(project_id, version_number, description, actor, Some(files))
            .await
    }

    /// Record a new version holding the project's current file set.
    ///
    /// # Errors
    ///
    /// Same as [`LoomService::create_version`].
    pub async fn snapshot_version(
        &self,
        project_id: &str,
        version_number: &str,
        description: Option<&str>,
        actor: &Actor,
    ) -> Result<Version, DatabaseError> {
        validate_version_number(version_number)?;
        self.record_version(project_id, version_number, description, actor, None)
            .await
    }

    /// Shared path for explicit and snapshot versions. `None` copies the
    /// current project files inside the same transaction.
    async fn record_version(
        &self,
        project_id: &str,
        version_number: &str,
        description: Option<&str>,
        actor: &Actor,
        files: Option<&FileSet>,
    ) -> Result<Version, DatabaseError> {
        let _unit = self.db().write_unit().await;
        let version = Version {
            id: self.db().generate_id(PREFIX_VERSION).await?,
            project_id: project_id.to_string(),
            version_number: version_number.to_string(),
            description: description.map(String::from),
            created_by: actor.user_id.clone(),
            created_at: now(),
        };

        let tx = self.db().conn().transaction().await?;
        let result = async {
            check_access(&tx, project_id, actor, Permission::Write).await?;
            let file_count = match files {
                Some(files) => {
                    insert_version(&tx, &version, files).await?;
                    files.len()
                }
                None => {
                    let current: FileSet = fetch_files(&tx, project_id)
                        .await?
                        .into_iter()
                        .map(|f| (f.path, f.content))
                        .collect();
                    insert_version(&tx, &version, &current).await?;
                    current.len()
                }
            };
            Ok::<_, DatabaseError>(file_count)
        }
        .await;
        let file_count = finish(tx, result).await?;

        tracing::info!(
            %project_id,
            version = %version.version_number,
            version_id = %version.id,
            file_count,
            created_by = %actor.user_id,
            "version created"
        );
        Ok(version)
    }

    /// Versions of a project, newest first by creation time.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Forbidden`.
    pub async fn list_versions(
        &self,
        project_id: &str,
        actor: &Actor,
    ) -> Result<Vec<Version>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let conn = self.db().conn();
        check_access(conn, project_id, actor, Permission::Read).await?;

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM project_versions WHERE project_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [project_id],
            )
            .await?;
        let mut versions = Vec::new();
        while let Some(row) = rows.next().await? {
            versions.push(row_to_version(&row)?);
        }
        Ok(versions)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Forbidden`.
    pub async fn get_version(
        &self,
        version_id: &str,
        actor: &Actor,
    ) -> Result<Version, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let conn = self.db().conn();
        let version = fetch_version(conn, version_id).await?;
        check_access(conn, &version.project_id, actor, Permission::Read).await?;
        Ok(version)
    }

    /// Files of a version, ordered by path, exactly as they were recorded.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Forbidden`.
    pub async fn get_version_files(
        &self,
        version_id: &str,
        actor: &Actor,
    ) -> Result<Vec<VersionFile>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let conn = self.db().conn();
        let version = fetch_version(conn, version_id).await?;
        check_access(conn, &version.project_id, actor, Permission::Read).await?;

        let mut rows = conn
            .query(
                "SELECT path, content FROM version_files WHERE version_id = ?1 ORDER BY path",
                [version_id],
            )
            .await?;
        let mut files = Vec::new();
        while let Some(row) = rows.next().await? {
            files.push(VersionFile {
                path: row.get(0)?,
                content: row.get(1)?,
            });
        }
        Ok(files)
    }
}
