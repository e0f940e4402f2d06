//! Entity structs for all Loom domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `loom-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod comment;
mod project;
mod share;
mod user;
mod version;

pub use comment::{Comment, Reply};
pub use project::{ExportedFile, FileSet, Project, ProjectDetail, ProjectExport, ProjectFile};
pub use share::ShareGrant;
pub use user::User;
pub use version::{Version, VersionFile};
