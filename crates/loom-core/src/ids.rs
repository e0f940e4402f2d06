//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, e.g. `prj-a3f8b2c1`. The random
//! part is produced by libSQL (`randomblob(4)`) in `loom-db`.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_SHARE: &str = "shr";
pub const PREFIX_VERSION: &str = "ver";
pub const PREFIX_COMMENT: &str = "cmt";
pub const PREFIX_REPLY: &str = "rpl";
