//! User directory: registration and lookup.
//!
//! Password hashes are opaque here; hashing and credential checks belong to
//! the caller's identity service.

use loom_core::entities::User;
use loom_core::enums::Role;
use loom_core::identity::Actor;
use loom_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::helpers::{finish, is_unique_violation, now, parse_datetime, parse_enum, timestamp};
use crate::service::LoomService;

const SELECT_COLS: &str = "id, email, handle, password_hash, role, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        handle: row.get(2)?,
        password_hash: row.get(3)?,
        role: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

pub(crate) async fn fetch_user(
    conn: &libsql::Connection,
    id: &str,
) -> Result<User, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("user", id))?;
    row_to_user(&row)
}

async fn exists(
    conn: &libsql::Connection,
    column: &str,
    value: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT 1 FROM users WHERE {column} = ?1"), [value])
        .await?;
    Ok(rows.next().await?.is_some())
}

impl LoomService {
    /// Register a user. Email and handle must both be unused.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty or taken email/handle.
    pub async fn create_user(
        &self,
        email: &str,
        handle: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, DatabaseError> {
        if email.trim().is_empty() || handle.trim().is_empty() {
            return Err(DatabaseError::Validation(
                "email and handle must not be empty".into(),
            ));
        }

        let _unit = self.db().write_unit().await;
        let id = self.db().generate_id(PREFIX_USER).await?;
        let now = now();

        let tx = self.db().conn().transaction().await?;
        let result = async {
            if exists(&tx, "email", email).await? {
                return Err(DatabaseError::Validation(format!(
                    "email already registered: {email}"
                )));
            }
            if exists(&tx, "handle", handle).await? {
                return Err(DatabaseError::Validation(format!(
                    "handle already taken: {handle}"
                )));
            }
            tx.execute(
                &format!("INSERT INTO users ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    email,
                    handle,
                    password_hash,
                    role.as_str(),
                    timestamp(&now)
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::Validation(format!("email or handle already registered: {e}"))
                } else {
                    e.into()
                }
            })?;
            Ok::<_, DatabaseError>(())
        }
        .await;
        finish(tx, result).await?;

        tracing::info!(user_id = %id, %handle, role = %role, "user created");

        Ok(User {
            id,
            email: email.to_string(),
            handle: handle.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no user has this id.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let _unit = self.db().read_unit().await;
        fetch_user(self.db().conn(), id).await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let _unit = self.db().read_unit().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Resolve a user id into the identity value passed to gated operations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no user has this id.
    pub async fn actor_for(&self, user_id: &str) -> Result<Actor, DatabaseError> {
        Ok(self.get_user(user_id).await?.to_actor())
    }
}
