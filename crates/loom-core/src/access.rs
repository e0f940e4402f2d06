//! The access ladder.
//!
//! Two different rules live here:
//!
//! - [`resolve`] answers "may this actor read/write/administer the project?"
//!   and accepts ownership, the global admin role, or a share grant high
//!   enough on the `read < write < admin` ladder.
//! - [`can_manage_shares`] answers "may this actor grant, revoke or list
//!   shares?" and accepts only the literal owner or a global admin. A share
//!   grant at `admin` level does not qualify.
//!
//! Both are pure; callers load the current grant on every check.

use crate::enums::Permission;
use crate::identity::Actor;

/// Decide whether `actor` may act on a project at the `required` level.
///
/// `held` is the actor's current share grant on the project, if any.
#[must_use]
pub fn resolve(
    owner_id: &str,
    actor: &Actor,
    held: Option<Permission>,
    required: Permission,
) -> bool {
    if actor.is_admin() || actor.user_id == owner_id {
        return true;
    }
    held.is_some_and(|level| level.satisfies(required))
}

/// Decide whether `actor` may manage the share grants of a project.
#[must_use]
pub fn can_manage_shares(owner_id: &str, actor: &Actor) -> bool {
    actor.is_admin() || actor.user_id == owner_id
}
