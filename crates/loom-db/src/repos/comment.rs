//! Collaboration log: comment threads on projects.
//!
//! Commenting, replying and reading threads require read access to the
//! project. Only the author or a global admin may edit a comment.

use loom_core::entities::{Comment, Reply};
use loom_core::enums::Permission;
use loom_core::identity::Actor;
use loom_core::ids::{PREFIX_COMMENT, PREFIX_REPLY};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, now, parse_datetime, timestamp};
use crate::repos::access::check_access;
use crate::service::LoomService;

const SELECT_COLS: &str =
    "id, project_id, author_id, content, file_path, line_number, created_at, updated_at";

const REPLY_COLS: &str = "id, comment_id, author_id, content, created_at";

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    let line_number = row
        .get::<Option<i64>>(5)?
        .map(u32::try_from)
        .transpose()
        .map_err(|e| DatabaseError::InvalidState(format!("line_number out of range: {e}")))?;
    Ok(Comment {
        id: row.get(0)?,
        project_id: row.get(1)?,
        author_id: row.get(2)?,
        content: row.get(3)?,
        file_path: get_opt_string(row, 4)?,
        line_number,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
        replies: Vec::new(),
    })
}

fn row_to_reply(row: &libsql::Row) -> Result<Reply, DatabaseError> {
    Ok(Reply {
        id: row.get(0)?,
        comment_id: row.get(1)?,
        author_id: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn require_content(content: &str) -> Result<(), DatabaseError> {
    if content.trim().is_empty() {
        return Err(DatabaseError::Validation("content must not be empty".into()));
    }
    Ok(())
}

async fn fetch_comment(
    conn: &libsql::Connection,
    comment_id: &str,
) -> Result<Comment, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM comments WHERE id = ?1"),
            [comment_id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("comment", comment_id))?;
    row_to_comment(&row)
}

async fn fetch_replies(
    conn: &libsql::Connection,
    comment_id: &str,
) -> Result<Vec<Reply>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {REPLY_COLS} FROM comment_replies WHERE comment_id = ?1
                 ORDER BY created_at, rowid"
            ),
            [comment_id],
        )
        .await?;
    let mut replies = Vec::new();
    while let Some(row) = rows.next().await? {
        replies.push(row_to_reply(&row)?);
    }
    Ok(replies)
}

impl LoomService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound`, `Forbidden` without read access, or
    /// `Validation` for empty content.
    pub async fn add_comment(
        &self,
        project_id: &str,
        actor: &Actor,
        content: &str,
        file_path: Option<&str>,
        line_number: Option<u32>,
    ) -> Result<Comment, DatabaseError> {
        require_content(content)?;

        let _unit = self.db().write_unit().await;
        let conn = self.db().conn();
        check_access(conn, project_id, actor, Permission::Read).await?;

        let id = self.db().generate_id(PREFIX_COMMENT).await?;
        let created = now();
        conn.execute(
            &format!("INSERT INTO comments ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)"),
            libsql::params![
                id.as_str(),
                project_id,
                actor.user_id.as_str(),
                content,
                file_path,
                line_number,
                timestamp(&created)
            ],
        )
        .await?;

        tracing::debug!(comment_id = %id, %project_id, author_id = %actor.user_id, "comment added");

        Ok(Comment {
            id,
            project_id: project_id.to_string(),
            author_id: actor.user_id.clone(),
            content: content.to_string(),
            file_path: file_path.map(String::from),
            line_number,
            created_at: created,
            updated_at: created,
            replies: Vec::new(),
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown comment, `Forbidden`
    /// without read access to its project, or `Validation` for empty content.
    pub async fn add_reply(
        &self,
        comment_id: &str,
        actor: &Actor,
        content: &str,
    ) -> Result<Reply, DatabaseError> {
        require_content(content)?;

        let _unit = self.db().write_unit().await;
        let conn = self.db().conn();
        let comment = fetch_comment(conn, comment_id).await?;
        check_access(conn, &comment.project_id, actor, Permission::Read).await?;

        let id = self.db().generate_id(PREFIX_REPLY).await?;
        let created = now();
        conn.execute(
            &format!("INSERT INTO comment_replies ({REPLY_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            libsql::params![
                id.as_str(),
                comment_id,
                actor.user_id.as_str(),
                content,
                timestamp(&created)
            ],
        )
        .await?;

        tracing::debug!(reply_id = %id, %comment_id, author_id = %actor.user_id, "reply added");

        Ok(Reply {
            id,
            comment_id: comment_id.to_string(),
            author_id: actor.user_id.clone(),
            content: content.to_string(),
            created_at: created,
        })
    }

    /// Replace a comment's content. Author or global admin only.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound`, `Forbidden`, or `Validation`.
    pub async fn edit_comment(
        &self,
        comment_id: &str,
        content: &str,
        actor: &Actor,
    ) -> Result<Comment, DatabaseError> {
        require_content(content)?;

        let _unit = self.db().write_unit().await;
        let conn = self.db().conn();
        let comment = fetch_comment(conn, comment_id).await?;
        if comment.author_id != actor.user_id && !actor.is_admin() {
            return Err(DatabaseError::Forbidden(format!(
                "only the author may edit comment {comment_id}"
            )));
        }

        let updated = now();
        conn.execute(
            "UPDATE comments SET content = ?1, updated_at = ?2 WHERE id = ?3",
            libsql::params![content, timestamp(&updated), comment_id],
        )
        .await?;
        let replies = fetch_replies(conn, comment_id).await?;

        Ok(Comment {
            content: content.to_string(),
            updated_at: updated,
            replies,
            ..comment
        })
    }

    /// Comments on a project, newest first, each with its replies oldest first.
    ///
    /// With `file_path`, only comments anchored to that file are returned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Forbidden`.
    pub async fn list_comments(
        &self,
        project_id: &str,
        file_path: Option<&str>,
        actor: &Actor,
    ) -> Result<Vec<Comment>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let conn = self.db().conn();
        check_access(conn, project_id, actor, Permission::Read).await?;

        let mut rows = match file_path {
            Some(path) => {
                conn.query(
                    &format!(
                        "SELECT {SELECT_COLS} FROM comments WHERE project_id = ?1 AND file_path = ?2
                         ORDER BY created_at DESC, rowid DESC"
                    ),
                    [project_id, path],
                )
                .await?
            }
            None => {
                conn.query(
                    &format!(
                        "SELECT {SELECT_COLS} FROM comments WHERE project_id = ?1
                         ORDER BY created_at DESC, rowid DESC"
                    ),
                    [project_id],
                )
                .await?
            }
        };

        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            comments.push(row_to_comment(&row)?);
        }
        for comment in &mut comments {
            comment.replies = fetch_replies(conn, &comment.id).await?;
        }
        Ok(comments)
    }
}
