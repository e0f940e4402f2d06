//! Project store: projects and their file sets.
//!
//! Project creation, file replacement and deletion each run as one
//! transaction under the exclusive unit-of-work gate. Reads that combine the
//! project row with its files hold the gate shared.

use loom_core::entities::{FileSet, Project, ProjectDetail, ProjectExport, ProjectFile};
use loom_core::enums::{FileKind, Permission};
use loom_core::identity::Actor;
use loom_core::ids::PREFIX_PROJECT;
use loom_core::plan::Plan;

use crate::error::DatabaseError;
use crate::helpers::{
    finish, get_opt_string, now, parse_datetime, parse_enum, parse_plan, timestamp,
};
use crate::repos::access::check_access;
use crate::repos::user::fetch_user;
use crate::service::LoomService;
use crate::updates::project::ProjectUpdate;

const SELECT_COLS: &str =
    "id, description, project_type, structure, model, owner_id, created_at, updated_at";

const FILE_COLS: &str = "project_id, path, content, kind, created_at, updated_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        description: row.get(1)?,
        project_type: row.get(2)?,
        structure: parse_plan(&row.get::<String>(3)?)?,
        model: get_opt_string(row, 4)?,
        owner_id: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn row_to_file(row: &libsql::Row) -> Result<ProjectFile, DatabaseError> {
    Ok(ProjectFile {
        project_id: row.get(0)?,
        path: row.get(1)?,
        content: row.get(2)?,
        kind: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

pub(crate) async fn fetch_project(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Project, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"), [id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("project", id))?;
    row_to_project(&row)
}

pub(crate) async fn fetch_files(
    conn: &libsql::Connection,
    project_id: &str,
) -> Result<Vec<ProjectFile>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {FILE_COLS} FROM project_files WHERE project_id = ?1 ORDER BY path"),
            [project_id],
        )
        .await?;
    let mut files = Vec::new();
    while let Some(row) = rows.next().await? {
        files.push(row_to_file(&row)?);
    }
    Ok(files)
}

async fn collect_projects(mut rows: libsql::Rows) -> Result<Vec<Project>, DatabaseError> {
    let mut projects = Vec::new();
    while let Some(row) = rows.next().await? {
        projects.push(row_to_project(&row)?);
    }
    Ok(projects)
}

async fn insert_files(
    conn: &libsql::Connection,
    project_id: &str,
    files: &FileSet,
    now: &str,
) -> Result<Vec<ProjectFile>, DatabaseError> {
    let mut saved = Vec::with_capacity(files.len());
    for (path, content) in files {
        let kind = FileKind::classify(path);
        conn.execute(
            &format!("INSERT INTO project_files ({FILE_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?5)"),
            libsql::params![project_id, path.as_str(), content.as_str(), kind.as_str(), now],
        )
        .await?;
        saved.push(ProjectFile {
            project_id: project_id.to_string(),
            path: path.clone(),
            content: content.clone(),
            kind,
            created_at: parse_datetime(now)?,
            updated_at: parse_datetime(now)?,
        });
    }
    Ok(saved)
}

/// Lowercase form stored in `description_folded`. Folds every letter,
/// not only ASCII.
fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Escape `%`, `_` and `\` so user input matches literally inside `LIKE`.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

async fn load_detail(
    conn: &libsql::Connection,
    id: &str,
    actor: Option<&Actor>,
) -> Result<ProjectDetail, DatabaseError> {
    let project = match actor {
        Some(actor) => check_access(conn, id, actor, Permission::Read).await?,
        None => fetch_project(conn, id).await?,
    };
    let files = fetch_files(conn, id).await?;
    Ok(ProjectDetail { project, files })
}

impl LoomService {
    /// Persist a project and every file in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the owner does not exist. Any
    /// failure rolls back the project row together with all file rows.
    pub async fn create_project(
        &self,
        description: &str,
        project_type: &str,
        plan: &Plan,
        files: &FileSet,
        owner_id: &str,
        model: Option<&str>,
    ) -> Result<ProjectDetail, DatabaseError> {
        let structure =
            serde_json::to_string(plan).map_err(|e| DatabaseError::Other(e.into()))?;

        let _unit = self.db().write_unit().await;
        let id = self.db().generate_id(PREFIX_PROJECT).await?;
        let now = now();
        let stamp = timestamp(&now);

        let tx = self.db().conn().transaction().await?;
        let result = async {
            fetch_user(&tx, owner_id).await?;
            tx.execute(
                &format!(
                    "INSERT INTO projects ({SELECT_COLS}, description_folded)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    description,
                    project_type,
                    structure.as_str(),
                    model,
                    owner_id,
                    stamp.as_str(),
                    fold(description)
                ],
            )
            .await?;
            insert_files(&tx, &id, files, &stamp).await
        }
        .await;
        let saved = finish(tx, result).await?;

        tracing::info!(
            project_id = %id,
            %owner_id,
            file_count = saved.len(),
            "project created"
        );

        Ok(ProjectDetail {
            project: Project {
                id,
                description: description.to_string(),
                project_type: project_type.to_string(),
                structure: plan.clone(),
                model: model.map(String::from),
                owner_id: owner_id.to_string(),
                created_at: now,
                updated_at: now,
            },
            files: saved,
        })
    }

    /// Fetch a project with its files.
    ///
    /// With an actor, read access is required; without one the project is
    /// returned unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Forbidden`.
    pub async fn get_project(
        &self,
        id: &str,
        actor: Option<&Actor>,
    ) -> Result<ProjectDetail, DatabaseError> {
        let _unit = self.db().read_unit().await;
        load_detail(self.db().conn(), id, actor).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project does not exist.
    pub async fn get_project_files(&self, id: &str) -> Result<Vec<ProjectFile>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        fetch_project(self.db().conn(), id).await?;
        fetch_files(self.db().conn(), id).await
    }

    /// Backup view of a project: its fields plus every file with its kind.
    ///
    /// # Errors
    ///
    /// Same as [`LoomService::get_project`].
    pub async fn export_project(
        &self,
        id: &str,
        actor: Option<&Actor>,
    ) -> Result<ProjectExport, DatabaseError> {
        let _unit = self.db().read_unit().await;
        load_detail(self.db().conn(), id, actor)
            .await
            .map(ProjectExport::from)
    }

    /// Newest first, optionally restricted to one project type.
    pub async fn list_projects(
        &self,
        offset: u32,
        limit: u32,
        project_type: Option<&str>,
    ) -> Result<Vec<Project>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let rows = match project_type {
            Some(project_type) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM projects WHERE project_type = ?1
                             ORDER BY created_at DESC, rowid DESC LIMIT ?2 OFFSET ?3"
                        ),
                        libsql::params![project_type, limit, offset],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM projects
                             ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2"
                        ),
                        libsql::params![limit, offset],
                    )
                    .await?
            }
        };
        collect_projects(rows).await
    }

    /// Case-insensitive substring match on the description, newest first.
    pub async fn search_projects(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Project>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM projects
                     WHERE description_folded LIKE ?1 ESCAPE '\\'
                     ORDER BY created_at DESC, rowid DESC LIMIT ?2"
                ),
                libsql::params![like_pattern(&fold(query)), limit],
            )
            .await?;
        collect_projects(rows).await
    }

    /// Projects owned by `user_id`, newest first.
    pub async fn list_owned_projects(&self, user_id: &str) -> Result<Vec<Project>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM projects WHERE owner_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [user_id],
            )
            .await?;
        collect_projects(rows).await
    }

    /// Partial update; only supplied fields change. Concurrent updates are
    /// last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project does not exist.
    pub async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, DatabaseError> {
        self.apply_update(id, update, None).await
    }

    /// [`LoomService::update_project`] for `actor`, who needs write access.
    ///
    /// The check and the write share one exclusive unit, so a revoke either
    /// lands before the check or after the update.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Forbidden`.
    pub async fn update_project_as(
        &self,
        id: &str,
        update: ProjectUpdate,
        actor: &Actor,
    ) -> Result<Project, DatabaseError> {
        self.apply_update(id, update, Some(actor)).await
    }

    async fn apply_update(
        &self,
        id: &str,
        update: ProjectUpdate,
        actor: Option<&Actor>,
    ) -> Result<Project, DatabaseError> {
        let _unit = self.db().write_unit().await;
        let conn = self.db().conn();
        let current = match actor {
            Some(actor) => check_access(conn, id, actor, Permission::Write).await?,
            None => fetch_project(conn, id).await?,
        };
        if update.is_empty() {
            return Ok(current);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().into());
            idx += 1;
            sets.push(format!("description_folded = ?{idx}"));
            params.push(fold(description).into());
            idx += 1;
        }
        if let Some(ref project_type) = update.project_type {
            sets.push(format!("project_type = ?{idx}"));
            params.push(project_type.clone().into());
            idx += 1;
        }

        let now = now();
        sets.push(format!("updated_at = ?{idx}"));
        params.push(timestamp(&now).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE projects SET {} WHERE id = ?{idx}", sets.join(", "));
        conn.execute(&sql, libsql::params_from_iter(params)).await?;

        tracing::debug!(project_id = %id, ?update, "project updated");

        Ok(Project {
            description: update.description.unwrap_or(current.description),
            project_type: update.project_type.unwrap_or(current.project_type),
            updated_at: now,
            ..current
        })
    }

    /// Delete a project and everything hanging off it.
    ///
    /// Returns `false` if the project did not exist.
    pub async fn delete_project(&self, id: &str) -> Result<bool, DatabaseError> {
        self.remove_project(id, None).await
    }

    /// [`LoomService::delete_project`] for `actor`, who needs admin access.
    /// The check runs in the deleting transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Forbidden`.
    pub async fn delete_project_as(&self, id: &str, actor: &Actor) -> Result<bool, DatabaseError> {
        self.remove_project(id, Some(actor)).await
    }

    async fn remove_project(&self, id: &str, actor: Option<&Actor>) -> Result<bool, DatabaseError> {
        let _unit = self.db().write_unit().await;
        let tx = self.db().conn().transaction().await?;
        let result = async {
            if let Some(actor) = actor {
                check_access(&tx, id, actor, Permission::Admin).await?;
            }
            tx.execute("DELETE FROM project_files WHERE project_id = ?1", [id])
                .await?;
            let removed = tx.execute("DELETE FROM projects WHERE id = ?1", [id]).await?;
            Ok::<_, DatabaseError>(removed > 0)
        }
        .await;
        let deleted = finish(tx, result).await?;

        if deleted {
            tracing::info!(project_id = %id, "project deleted");
        }
        Ok(deleted)
    }

    /// Replace the whole file set of a project.
    ///
    /// The delete and the re-insert commit together; readers never see the
    /// project without files in between.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project does not exist.
    pub async fn replace_project_files(
        &self,
        id: &str,
        files: &FileSet,
    ) -> Result<Vec<ProjectFile>, DatabaseError> {
        self.swap_files(id, files, None).await
    }

    /// [`LoomService::replace_project_files`] for `actor`, who needs write
    /// access. The check runs in the replacing transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Forbidden`.
    pub async fn replace_project_files_as(
        &self,
        id: &str,
        files: &FileSet,
        actor: &Actor,
    ) -> Result<Vec<ProjectFile>, DatabaseError> {
        self.swap_files(id, files, Some(actor)).await
    }

    async fn swap_files(
        &self,
        id: &str,
        files: &FileSet,
        actor: Option<&Actor>,
    ) -> Result<Vec<ProjectFile>, DatabaseError> {
        let _unit = self.db().write_unit().await;
        let stamp = timestamp(&now());

        let tx = self.db().conn().transaction().await?;
        let result = async {
            match actor {
                Some(actor) => check_access(&tx, id, actor, Permission::Write).await?,
                None => fetch_project(&tx, id).await?,
            };
            tx.execute("DELETE FROM project_files WHERE project_id = ?1", [id])
                .await?;
            let saved = insert_files(&tx, id, files, &stamp).await?;
            tx.execute(
                "UPDATE projects SET updated_at = ?1 WHERE id = ?2",
                libsql::params![stamp.as_str(), id],
            )
            .await?;
            Ok::<_, DatabaseError>(saved)
        }
        .await;
        let saved = finish(tx, result).await?;

        tracing::info!(project_id = %id, file_count = saved.len(), "project files replaced");
        Ok(saved)
    }
}
