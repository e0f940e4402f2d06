//! Row-to-entity parsing helpers and transaction plumbing.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual datetime
//! format issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use loom_core::plan::Plan;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Current time at storage precision, so returned entities equal re-read ones.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp for storage.
///
/// Fixed microsecond precision keeps stored values lexically ordered, which
/// the `ORDER BY created_at` queries rely on.
#[must_use]
pub fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all loom-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Parse the stored `structure` column back into a plan.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the column is not a JSON object.
pub fn parse_plan(s: &str) -> Result<Plan, DatabaseError> {
    Plan::parse(s).map_err(|e| DatabaseError::InvalidState(format!("stored plan: {e}")))
}

/// Whether a libSQL error is a UNIQUE constraint violation.
///
/// Matches on the message, which is stable across the local and remote
/// libSQL backends.
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

/// Whether a libSQL error is a UNIQUE violation on exactly `columns`.
///
/// `columns` is spelled the way `SQLite` reports it, e.g.
/// `"project_versions.project_id, project_versions.version_number"`.
pub fn is_unique_violation_on(e: &libsql::Error, columns: &str) -> bool {
    let message = e.to_string();
    message
        .split_once("UNIQUE constraint failed: ")
        .is_some_and(|(_, failed)| failed.trim_end().starts_with(columns))
}

/// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the error.
///
/// A failing rollback is logged; the original error is still returned.
pub(crate) async fn finish<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::warn!(%rollback_error, %error, "transaction rollback failed");
            }
            Err(error)
        }
    }
}
