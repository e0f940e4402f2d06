//! # loom-db
//!
//! libSQL storage for Loom.
//!
//! Handles all relational state: users, projects and their files, share
//! grants, version snapshots, and comment threads. Every multi-row write runs
//! inside one transaction that rolls back on any failure.
//!
//! Uses the `libsql` crate (C `SQLite` fork) with a local database file, or
//! `:memory:` for tests.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Central database handle for all Loom state operations.
///
/// Wraps a libSQL database, a single connection, and the unit-of-work gate.
/// Mutations hold the gate exclusively for their whole transaction; reads that
/// span several rows hold it shared, so no reader ever sees a half-applied
/// write (for example a file set between its delete and its re-insert).
pub struct LoomDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: RwLock<()>,
}

impl LoomDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let loom_db = Self {
            db,
            conn,
            gate: RwLock::new(()),
        };
        loom_db.run_migrations().await?;
        Ok(loom_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"prj-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Shared access for reads that must see a consistent multi-row state.
    pub(crate) async fn read_unit(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().await
    }

    /// Exclusive access for a mutation and its transaction.
    pub(crate) async fn write_unit(&self) -> RwLockWriteGuard<'_, ()> {
        self.gate.write().await
    }
}
