//! Roles, permission levels, and file kinds for Loom.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the value stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Global role of a user. `Admin` satisfies every access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(CoreError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Permission
// ---------------------------------------------------------------------------

/// Permission level of a share grant.
///
/// Variants are declared in ladder order so the derived `Ord` gives
/// `Read < Write < Admin`.
///
/// ```text
/// read < write < admin
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Read,
    Write,
    Admin,
}

impl Permission {
    /// Whether holding `self` is enough for an operation that needs `required`.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "admin" => Ok(Self::Admin),
            other => Err(CoreError::Validation(format!(
                "unknown permission '{other}' (expected read, write or admin)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// FileKind
// ---------------------------------------------------------------------------

/// Which half of a generated project a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Frontend,
    Backend,
}

impl FileKind {
    /// Classify a project-relative path by its leading segment.
    ///
    /// Only a first segment of exactly `frontend` yields `Frontend`; everything
    /// else is `Backend`. `backend-utils/frontend.ts` is therefore `Backend`.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        let trimmed = path.trim_start_matches("./").trim_start_matches('/');
        match trimmed.split('/').next() {
            Some("frontend") => Self::Frontend,
            _ => Self::Backend,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn permission_ladder_order() {
        assert!(Permission::Read < Permission::Write);
        assert!(Permission::Write < Permission::Admin);
    }

    #[rstest]
    #[case(Permission::Read, Permission::Read, true)]
    #[case(Permission::Read, Permission::Write, false)]
    #[case(Permission::Read, Permission::Admin, false)]
    #[case(Permission::Write, Permission::Read, true)]
    #[case(Permission::Write, Permission::Write, true)]
    #[case(Permission::Write, Permission::Admin, false)]
    #[case(Permission::Admin, Permission::Read, true)]
    #[case(Permission::Admin, Permission::Write, true)]
    #[case(Permission::Admin, Permission::Admin, true)]
    fn permission_satisfies(
        #[case] held: Permission,
        #[case] required: Permission,
        #[case] expected: bool,
    ) {
        assert_eq!(held.satisfies(required), expected);
    }

    #[test]
    fn permission_parse_roundtrip() {
        for p in [Permission::Read, Permission::Write, Permission::Admin] {
            assert_eq!(p.as_str().parse::<Permission>().unwrap(), p);
        }
        assert!("owner".parse::<Permission>().is_err());
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
    }

    #[rstest]
    #[case("frontend/src/pages/index.tsx", FileKind::Frontend)]
    #[case("./frontend/src/utils/api.ts", FileKind::Frontend)]
    #[case("/frontend/index.html", FileKind::Frontend)]
    #[case("backend/main.py", FileKind::Backend)]
    #[case("backend-utils/frontend.ts", FileKind::Backend)]
    #[case("frontend-old/app.ts", FileKind::Backend)]
    #[case("README.md", FileKind::Backend)]
    fn file_kind_classifies_by_leading_segment(#[case] path: &str, #[case] expected: FileKind) {
        assert_eq!(FileKind::classify(path), expected);
    }
}
