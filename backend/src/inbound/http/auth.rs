//! Caller resolution for protected handlers.
//!
//! Reads the session snapshot, applies the configured [`SessionPolicy`],
//! then runs the role predicates from [`crate::domain::authorization`].

use tracing::info;

use crate::domain::authorization;
use crate::domain::{Error, Role, SessionPolicy, SessionSnapshot};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// The caller's snapshot after policy checks, or `None` when there is no
/// usable session.
///
/// Under [`SessionPolicy::Revalidate`] the registrant is reloaded: a
/// registrant that has vanished purges the session, one that is no longer
/// accepted is `not_approved`, and the returned snapshot carries the
/// current role.
pub async fn current_snapshot(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<Option<SessionSnapshot>> {
    let Some(snapshot) = session.snapshot()? else {
        return Ok(None);
    };
    match state.policy {
        SessionPolicy::TrustSnapshot => Ok(Some(snapshot)),
        SessionPolicy::Revalidate => {
            let Some(current) = state.credentials.find(snapshot.identity()).await? else {
                info!(username = %snapshot.identity(), "session refers to unknown registrant");
                session.purge();
                return Ok(None);
            };
            if !current.is_accepted() {
                return Err(Error::not_approved("Your signup request is not yet accepted"));
            }
            Ok(Some(snapshot.refreshed(&current)))
        }
    }
}

/// Require any authenticated caller.
pub async fn require_session(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<SessionSnapshot> {
    let snapshot = current_snapshot(state, session).await?;
    authorization::require_authenticated(snapshot.as_ref()).cloned()
}

/// Require a caller holding exactly `role`.
pub async fn require_role(
    state: &HttpState,
    session: &SessionContext,
    role: Role,
) -> ApiResult<SessionSnapshot> {
    let snapshot = current_snapshot(state, session).await?;
    authorization::require_role(snapshot.as_ref(), role).cloned()
}

/// Require a caller holding one of `roles`.
pub async fn require_any_role(
    state: &HttpState,
    session: &SessionContext,
    roles: &[Role],
) -> ApiResult<SessionSnapshot> {
    let snapshot = current_snapshot(state, session).await?;
    authorization::require_any_role(snapshot.as_ref(), roles).cloned()
}
