use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Authenticated user identity passed into every actor-gated operation.
///
/// Supplied by the caller's token service (or the CLI's `--as` flag). Contains
/// only data fields; Loom never checks credentials itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Actor {
    pub user_id: String,
    pub email: String,
    pub handle: String,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
