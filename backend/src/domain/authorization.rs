//! Role and session predicates guarding registry operations.
//!
//! These are pure checks over the [`SessionSnapshot`] resolved for a request.
//! Plain session checks answer `unauthorized` when there is no snapshot.
//! Role checks answer `forbidden` whether the snapshot is missing or carries
//! the wrong role.

use super::registrant::Role;
use super::session::SessionSnapshot;
use super::Error;

const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Require any established session.
///
/// # Examples
/// ```
/// use voter_registry::domain::{ErrorCode, authorization::require_authenticated};
///
/// let err = require_authenticated(None).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// ```
pub fn require_authenticated(snapshot: Option<&SessionSnapshot>) -> Result<&SessionSnapshot, Error> {
    snapshot.ok_or_else(|| Error::unauthorized(NOT_AUTHENTICATED))
}

/// Require a session whose role is exactly `role`.
pub fn require_role(snapshot: Option<&SessionSnapshot>, role: Role) -> Result<&SessionSnapshot, Error> {
    match snapshot {
        Some(snapshot) if snapshot.role() == role => Ok(snapshot),
        _ => Err(Error::forbidden(format!("{} access required", capitalised(role)))),
    }
}

/// Require a session whose role is one of `roles`.
pub fn require_any_role<'a>(
    snapshot: Option<&'a SessionSnapshot>,
    roles: &[Role],
) -> Result<&'a SessionSnapshot, Error> {
    match snapshot {
        Some(snapshot) if roles.contains(&snapshot.role()) => Ok(snapshot),
        _ => Err(Error::forbidden("Access denied")),
    }
}

fn capitalised(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::Admin => "Admin",
        Role::Authority => "Authority",
    }
}
