//! Service layer hosting every repository operation.
//!
//! `LoomService` wraps `LoomDb`. All repo methods are implemented as
//! `impl LoomService` blocks in `crate::repos`.
//!
//! Every mutation follows this protocol:
//! 1. Acquire the unit-of-work gate exclusively
//! 2. Begin transaction
//! 3. Check existence and access against current rows
//! 4. Execute SQL
//! 5. Commit (or roll back on any error)
//! 6. Emit a tracing event

use crate::LoomDb;
use crate::error::DatabaseError;

pub struct LoomService {
    db: LoomDb,
}

impl LoomService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = LoomDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LoomDb {
        &self.db
    }
}
