//! Session snapshot carried by the client cookie.
//!
//! Login captures the registrant's identity, role, approval status, and
//! constituency at that instant. How much later requests trust that copy is
//! governed by [`SessionPolicy`].

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::registrant::{ApprovalStatus, Constituency, Identity, Registrant, Role};

/// Snapshot of a registrant taken at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(rename = "username")]
    #[schema(value_type = String, example = "adminA")]
    identity: Identity,
    role: Role,
    status: ApprovalStatus,
    #[schema(value_type = String)]
    constituency: Constituency,
    issued_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Capture `registrant` as of `issued_at`.
    pub fn capture(registrant: &Registrant, issued_at: DateTime<Utc>) -> Self {
        Self {
            identity: registrant.identity().clone(),
            role: registrant.role(),
            status: registrant.status(),
            constituency: registrant.constituency().clone(),
            issued_at,
        }
    }

    /// Replace the captured role, status, and constituency with the
    /// registrant's current values, keeping the original issue time.
    #[must_use]
    pub fn refreshed(self, current: &Registrant) -> Self {
        Self {
            identity: current.identity().clone(),
            role: current.role(),
            status: current.status(),
            constituency: current.constituency().clone(),
            issued_at: self.issued_at,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> ApprovalStatus {
        self.status
    }

    pub fn constituency(&self) -> &Constituency {
        &self.constituency
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

/// How authenticated requests treat the snapshot stored in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// Authorize on the snapshot alone. Role or status changes take effect
    /// at the next login.
    #[default]
    TrustSnapshot,
    /// Reload the registrant on every request. A registrant that has
    /// disappeared invalidates the session.
    Revalidate,
}

impl SessionPolicy {
    /// Configuration spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TrustSnapshot => "trust_snapshot",
            Self::Revalidate => "revalidate",
        }
    }
}

/// Unrecognised session policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown session policy '{0}', expected trust_snapshot or revalidate")]
pub struct SessionPolicyParseError(String);

impl FromStr for SessionPolicy {
    type Err = SessionPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trust_snapshot" => Ok(Self::TrustSnapshot),
            "revalidate" => Ok(Self::Revalidate),
            _ => Err(SessionPolicyParseError(s.to_owned())),
        }
    }
}
