//! # loom-core
//!
//! Core types, ID prefixes, and error types for Loom.
//!
//! This crate provides the foundational types shared across all Loom crates:
//! - Entity structs for all domain objects (projects, files, shares, versions, comments)
//! - Role, permission, and file-kind enums
//! - The access ladder decision used by every gated operation
//! - The opaque `Plan` document produced by requirement analysis
//! - Cross-cutting error types and failure categories

pub mod access;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod plan;
