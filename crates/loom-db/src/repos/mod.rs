//! Repository modules implementing every storage operation.
//!
//! Each module adds methods to `LoomService` via `impl LoomService` blocks.
//! Private helpers take a `&libsql::Connection` so they run unchanged inside a
//! transaction; public methods own the unit-of-work gate.

pub mod access;
pub mod comment;
pub mod project;
pub mod share;
pub mod user;
pub mod version;
