//! Share registry: per-project grants to other users.
//!
//! Granting, revoking and listing grants are owner-or-admin actions. A grant
//! at `admin` level does not let its holder manage other grants.

use serde::Serialize;

use loom_core::entities::{Project, ShareGrant};
use loom_core::enums::Permission;
use loom_core::identity::Actor;
use loom_core::ids::PREFIX_SHARE;

use crate::error::DatabaseError;
use crate::helpers::{finish, now, parse_datetime, parse_enum, timestamp};
use crate::repos::access::check_share_manager;
use crate::repos::project::fetch_project;
use crate::repos::user::fetch_user;
use crate::service::LoomService;

const SELECT_COLS: &str = "id, project_id, user_id, permission, created_at";

fn row_to_share(row: &libsql::Row) -> Result<ShareGrant, DatabaseError> {
    Ok(ShareGrant {
        id: row.get(0)?,
        project_id: row.get(1)?,
        user_id: row.get(2)?,
        permission: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

async fn fetch_share(
    conn: &libsql::Connection,
    project_id: &str,
    user_id: &str,
) -> Result<Option<ShareGrant>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM project_shares WHERE project_id = ?1 AND user_id = ?2"
            ),
            [project_id, user_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_share(&row)?)),
        None => Ok(None),
    }
}

/// A project shared with a user, with the level they hold on it.
#[derive(Debug, Clone, Serialize)]
pub struct SharedProject {
    #[serde(flatten)]
    pub project: Project,
    pub permission: Permission,
}

impl LoomService {
    /// Grant `user_id` access to a project, overwriting any existing level.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown project or grantee and
    /// `DatabaseError::Forbidden` unless `actor` owns the project or is an admin.
    pub async fn share_project(
        &self,
        project_id: &str,
        user_id: &str,
        permission: Permission,
        actor: &Actor,
    ) -> Result<ShareGrant, DatabaseError> {
        let _unit = self.db().write_unit().await;
        let new_id = self.db().generate_id(PREFIX_SHARE).await?;
        let created = now();

        let tx = self.db().conn().transaction().await?;
        let result = async {
            let project = fetch_project(&tx, project_id).await?;
            check_share_manager(&project, actor)?;
            fetch_user(&tx, user_id).await?;

            if let Some(existing) = fetch_share(&tx, project_id, user_id).await? {
                tx.execute(
                    "UPDATE project_shares SET permission = ?1 WHERE id = ?2",
                    libsql::params![permission.as_str(), existing.id.as_str()],
                )
                .await?;
                return Ok(ShareGrant {
                    permission,
                    ..existing
                });
            }

            tx.execute(
                &format!("INSERT INTO project_shares ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![
                    new_id.as_str(),
                    project_id,
                    user_id,
                    permission.as_str(),
                    timestamp(&created)
                ],
            )
            .await?;
            Ok::<_, DatabaseError>(ShareGrant {
                id: new_id.clone(),
                project_id: project_id.to_string(),
                user_id: user_id.to_string(),
                permission,
                created_at: created,
            })
        }
        .await;
        let grant = finish(tx, result).await?;

        tracing::info!(
            %project_id,
            %user_id,
            %permission,
            granted_by = %actor.user_id,
            "project shared"
        );
        Ok(grant)
    }

    /// Revoke a grant. Returns `false` if the user held none.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown project and
    /// `DatabaseError::Forbidden` unless `actor` owns the project or is an admin.
    pub async fn remove_share(
        &self,
        project_id: &str,
        user_id: &str,
        actor: &Actor,
    ) -> Result<bool, DatabaseError> {
        let _unit = self.db().write_unit().await;
        let tx = self.db().conn().transaction().await?;
        let result = async {
            let project = fetch_project(&tx, project_id).await?;
            check_share_manager(&project, actor)?;
            let removed = tx
                .execute(
                    "DELETE FROM project_shares WHERE project_id = ?1 AND user_id = ?2",
                    [project_id, user_id],
                )
                .await?;
            Ok::<_, DatabaseError>(removed > 0)
        }
        .await;
        let removed = finish(tx, result).await?;

        if removed {
            tracing::info!(%project_id, %user_id, revoked_by = %actor.user_id, "share removed");
        }
        Ok(removed)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown project and
    /// `DatabaseError::Forbidden` unless `actor` owns the project or is an admin.
    pub async fn list_shares(
        &self,
        project_id: &str,
        actor: &Actor,
    ) -> Result<Vec<ShareGrant>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let conn = self.db().conn();
        let project = fetch_project(conn, project_id).await?;
        check_share_manager(&project, actor)?;

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM project_shares WHERE project_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [project_id],
            )
            .await?;
        let mut shares = Vec::new();
        while let Some(row) = rows.next().await? {
            shares.push(row_to_share(&row)?);
        }
        Ok(shares)
    }

    /// Projects shared with `user_id`, newest first. Owned projects are not included.
    pub async fn list_shared_projects_for(
        &self,
        user_id: &str,
    ) -> Result<Vec<SharedProject>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let conn = self.db().conn();

        let mut rows = conn
            .query(
                "SELECT s.project_id, s.permission FROM project_shares s
                 JOIN projects p ON p.id = s.project_id
                 WHERE s.user_id = ?1
                 ORDER BY p.created_at DESC, p.rowid DESC",
                [user_id],
            )
            .await?;
        let mut grants: Vec<(String, Permission)> = Vec::new();
        while let Some(row) = rows.next().await? {
            grants.push((row.get(0)?, parse_enum(&row.get::<String>(1)?)?));
        }

        let mut shared = Vec::with_capacity(grants.len());
        for (project_id, permission) in grants {
            let project = fetch_project(conn, &project_id).await?;
            shared.push(SharedProject {
                project,
                permission,
            });
        }
        Ok(shared)
    }
}
