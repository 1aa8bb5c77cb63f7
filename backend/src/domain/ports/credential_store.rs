//! Driving port for signup, approval, and login.
//!
//! Inbound adapters call this port and never touch the registrant table or
//! partition registry directly.

use async_trait::async_trait;

use crate::domain::{
    ApprovalStatus, Constituency, Error, Identity, LoginCredentials, Registrant, SignupRequest,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create a registrant. Admins are accepted and get their partition
    /// immediately; everyone else waits in `pending`.
    ///
    /// Fails with `conflict` when the identity is taken.
    async fn register(&self, request: &SignupRequest) -> Result<Registrant, Error>;

    /// Accept a non-admin registrant and provision their partition.
    async fn approve(&self, identity: &Identity) -> Result<Registrant, Error>;

    /// Refuse a non-admin registrant.
    async fn reject(&self, identity: &Identity) -> Result<Registrant, Error>;

    /// Verify credentials of an accepted registrant.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Registrant, Error>;

    /// Non-admin registrants of `constituency` in `status`.
    async fn list_by_constituency_and_status(
        &self,
        constituency: &Constituency,
        status: ApprovalStatus,
    ) -> Result<Vec<Registrant>, Error>;

    async fn find(&self, identity: &Identity) -> Result<Option<Registrant>, Error>;
}
