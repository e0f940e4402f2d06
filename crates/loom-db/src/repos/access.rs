//! Access control against current share grants.
//!
//! Grants are read from the database on every check, never cached, so a
//! revoke is visible to the very next call.

use loom_core::access;
use loom_core::entities::Project;
use loom_core::enums::Permission;
use loom_core::identity::Actor;

use crate::error::DatabaseError;
use crate::helpers::parse_enum;
use crate::repos::project::fetch_project;
use crate::service::LoomService;

/// The actor's current grant level on a project, if any.
pub(crate) async fn held_permission(
    conn: &libsql::Connection,
    project_id: &str,
    user_id: &str,
) -> Result<Option<Permission>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT permission FROM project_shares WHERE project_id = ?1 AND user_id = ?2",
            [project_id, user_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(parse_enum(&row.get::<String>(0)?)?)),
        None => Ok(None),
    }
}

pub(crate) async fn evaluate(
    conn: &libsql::Connection,
    project: &Project,
    actor: &Actor,
    required: Permission,
) -> Result<bool, DatabaseError> {
    // Owner and admin short-circuit before the grant lookup.
    if access::resolve(&project.owner_id, actor, None, required) {
        return Ok(true);
    }
    let held = held_permission(conn, &project.id, &actor.user_id).await?;
    Ok(access::resolve(&project.owner_id, actor, held, required))
}

/// Load a project and fail unless `actor` holds `required` on it.
pub(crate) async fn check_access(
    conn: &libsql::Connection,
    project_id: &str,
    actor: &Actor,
    required: Permission,
) -> Result<Project, DatabaseError> {
    let project = fetch_project(conn, project_id).await?;
    if evaluate(conn, &project, actor, required).await? {
        Ok(project)
    } else {
        Err(forbidden(actor, required, project_id))
    }
}

pub(crate) fn forbidden(actor: &Actor, required: Permission, project_id: &str) -> DatabaseError {
    DatabaseError::Forbidden(format!(
        "user {} lacks {required} access to project {project_id}",
        actor.user_id
    ))
}

/// Fail unless `actor` is the literal owner of the project or a global admin.
pub(crate) fn check_share_manager(project: &Project, actor: &Actor) -> Result<(), DatabaseError> {
    if access::can_manage_shares(&project.owner_id, actor) {
        Ok(())
    } else {
        Err(DatabaseError::Forbidden(format!(
            "only the owner or an admin may manage shares of project {}",
            project.id
        )))
    }
}

impl LoomService {
    /// Decide whether `actor` holds `required` access on `project`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the grant lookup fails.
    pub async fn can_access(
        &self,
        project: &Project,
        actor: &Actor,
        required: Permission,
    ) -> Result<bool, DatabaseError> {
        let _unit = self.db().read_unit().await;
        evaluate(self.db().conn(), project, actor, required).await
    }

    /// Load a project, failing unless `actor` holds `required` access on it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown project and
    /// `DatabaseError::Forbidden` when access is insufficient.
    pub async fn require_access(
        &self,
        project_id: &str,
        actor: &Actor,
        required: Permission,
    ) -> Result<Project, DatabaseError> {
        let _unit = self.db().read_unit().await;
        check_access(self.db().conn(), project_id, actor, required).await
    }
}
