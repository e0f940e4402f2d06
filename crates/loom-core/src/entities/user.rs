use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;
use crate::identity::Actor;

/// A registered user. The password hash is opaque to Loom and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub handle: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The identity value handed to actor-gated operations.
    #[must_use]
    pub fn to_actor(&self) -> Actor {
        Actor {
            user_id: self.id.clone(),
            email: self.email.clone(),
            handle: self.handle.clone(),
            role: self.role,
        }
    }
}
