//! Port abstraction for registrant persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{ApprovalStatus, Constituency, Identity, Registrant};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by registrant repository adapters.
    pub enum RegistrantRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "registrant repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "registrant repository query failed: {message}",
        /// A registrant with the same identity already exists.
        Duplicate { identity: String } =>
            "registrant already exists: {identity}",
    }
}

/// Driven port over the registrant table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrantRepository: Send + Sync {
    /// Insert a new registrant.
    ///
    /// Uniqueness of the identity is enforced here; a second insert for the
    /// same identity fails with [`RegistrantRepositoryError::Duplicate`]
    /// even when both race.
    async fn insert(&self, registrant: &Registrant) -> Result<(), RegistrantRepositoryError>;

    /// Fetch a registrant by identity.
    async fn find(&self, identity: &Identity)
    -> Result<Option<Registrant>, RegistrantRepositoryError>;

    /// Overwrite the status of a non-admin registrant and return the updated
    /// record. Returns `None` when no non-admin registrant has `identity`.
    async fn set_status(
        &self,
        identity: &Identity,
        status: ApprovalStatus,
    ) -> Result<Option<Registrant>, RegistrantRepositoryError>;

    /// Non-admin registrants in `constituency` with `status`, ordered by
    /// identity.
    async fn list_by_constituency_and_status(
        &self,
        constituency: &Constituency,
        status: ApprovalStatus,
    ) -> Result<Vec<Registrant>, RegistrantRepositoryError>;
}
