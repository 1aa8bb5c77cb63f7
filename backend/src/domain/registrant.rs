//! Registrant credential records and their approval lifecycle.
//!
//! A registrant is created by signup and only ever mutated by an admin moving
//! it out of `pending`. Admins are accepted at creation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::SecretHash;

/// Maximum identity length in characters.
pub const IDENTITY_MAX: usize = 64;

/// Validation errors for registrant fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrantValidationError {
    #[error("username must not be empty")]
    EmptyIdentity,
    #[error("username must be at most {max} characters")]
    IdentityTooLong { max: usize },
    #[error("username must not contain control characters")]
    IdentityControlCharacters,
    #[error("constituency must not be empty")]
    EmptyConstituency,
    #[error("role must be one of user, admin, authority")]
    UnknownRole,
    #[error("status must be one of pending, accepted, refused")]
    UnknownStatus,
}

/// Globally unique registrant identity (the login username).
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`IDENTITY_MAX`] characters.
/// - Contains no control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Validate and construct an identity, trimming surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use voter_registry::domain::Identity;
    ///
    /// let id = Identity::new("  adminA ").unwrap();
    /// assert_eq!(id.as_ref(), "adminA");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RegistrantValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RegistrantValidationError::EmptyIdentity);
        }
        if trimmed.chars().count() > IDENTITY_MAX {
            return Err(RegistrantValidationError::IdentityTooLong { max: IDENTITY_MAX });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(RegistrantValidationError::IdentityControlCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        value.0
    }
}

impl TryFrom<String> for Identity {
    type Error = RegistrantValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Electoral constituency scoping approvals and the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Constituency(String);

impl Constituency {
    /// Validate and construct a constituency, trimming whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RegistrantValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RegistrantValidationError::EmptyConstituency);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Constituency {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Constituency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Constituency> for String {
    fn from(value: Constituency) -> Self {
        value.0
    }
}

impl TryFrom<String> for Constituency {
    type Error = RegistrantValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registrant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user; reads and lists voters in their own partition.
    #[default]
    User,
    /// Approves signups for their constituency and manages voter records.
    Admin,
    /// May update (not create or delete) voter records.
    Authority,
}

impl Role {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Authority => "authority",
        }
    }

    /// Approval status assigned at signup: admins skip the queue.
    pub const fn initial_status(self) -> ApprovalStatus {
        match self {
            Self::Admin => ApprovalStatus::Accepted,
            Self::User | Self::Authority => ApprovalStatus::Pending,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RegistrantValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "authority" => Ok(Self::Authority),
            _ => Err(RegistrantValidationError::UnknownRole),
        }
    }
}

/// Approval state. `pending` moves to `accepted` or `refused` by admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Accepted,
    Refused,
}

impl ApprovalStatus {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = RegistrantValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "refused" => Ok(Self::Refused),
            _ => Err(RegistrantValidationError::UnknownStatus),
        }
    }
}

/// Credential record for one signup.
///
/// Serialises without the secret hash; the JSON shape is what clients see
/// from signup, login, approval, and the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    #[serde(rename = "username")]
    #[schema(value_type = String, example = "adminA")]
    identity: Identity,
    #[serde(skip)]
    secret: SecretHash,
    role: Role,
    #[schema(value_type = String, example = "Pune Cantonment")]
    constituency: Constituency,
    status: ApprovalStatus,
}

impl Registrant {
    /// Build a freshly signed-up registrant with the status implied by `role`.
    pub fn signup(identity: Identity, secret: SecretHash, role: Role, constituency: Constituency) -> Self {
        Self {
            identity,
            secret,
            role,
            constituency,
            status: role.initial_status(),
        }
    }

    /// Rehydrate a registrant from persisted parts.
    pub fn from_parts(
        identity: Identity,
        secret: SecretHash,
        role: Role,
        constituency: Constituency,
        status: ApprovalStatus,
    ) -> Self {
        Self {
            identity,
            secret,
            role,
            constituency,
            status,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn secret(&self) -> &SecretHash {
        &self.secret
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn constituency(&self) -> &Constituency {
        &self.constituency
    }

    pub fn status(&self) -> ApprovalStatus {
        self.status
    }

    /// Whether the registrant may log in.
    pub fn is_accepted(&self) -> bool {
        self.status == ApprovalStatus::Accepted
    }

    /// Return a copy with `status` replaced.
    #[must_use]
    pub fn with_status(mut self, status: ApprovalStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for registrant field validation.
    use super::*;
    use rstest::rstest;

    fn secret() -> SecretHash {
        SecretHash::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
    }

    #[rstest]
    #[case("", RegistrantValidationError::EmptyIdentity)]
    #[case("   ", RegistrantValidationError::EmptyIdentity)]
    #[case("bad\nname", RegistrantValidationError::IdentityControlCharacters)]
    fn identity_rejects_invalid_values(#[case] raw: &str, #[case] expected: RegistrantValidationError) {
        assert_eq!(Identity::new(raw), Err(expected));
    }

    #[rstest]
    fn identity_rejects_overlong_values() {
        let raw = "a".repeat(IDENTITY_MAX + 1);
        assert_eq!(
            Identity::new(raw),
            Err(RegistrantValidationError::IdentityTooLong { max: IDENTITY_MAX })
        );
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case(" Admin ", Role::Admin)]
    #[case("AUTHORITY", Role::Authority)]
    fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    fn role_rejects_unknown_values() {
        assert_eq!("root".parse::<Role>(), Err(RegistrantValidationError::UnknownRole));
    }

    #[rstest]
    #[case(Role::Admin, ApprovalStatus::Accepted)]
    #[case(Role::User, ApprovalStatus::Pending)]
    #[case(Role::Authority, ApprovalStatus::Pending)]
    fn signup_status_follows_role(#[case] role: Role, #[case] expected: ApprovalStatus) {
        let registrant = Registrant::signup(
            Identity::new("bob").expect("identity"),
            secret(),
            role,
            Constituency::new("Ward 9").expect("constituency"),
        );
        assert_eq!(registrant.status(), expected);
    }

    #[rstest]
    fn serialisation_omits_secret() {
        let registrant = Registrant::signup(
            Identity::new("bob").expect("identity"),
            secret(),
            Role::User,
            Constituency::new("Ward 9").expect("constituency"),
        );
        let value = serde_json::to_value(&registrant).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "username": "bob",
                "role": "user",
                "constituency": "Ward 9",
                "status": "pending",
            })
        );
    }
}
