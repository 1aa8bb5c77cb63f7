//! Credential store service: signup, admin approval, and login.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::partition_provisioner::PartitionProvisioner;
use super::ports::{
    CredentialStore, PartitionRepository, RegistrantRepository, RegistrantRepositoryError,
};
use super::{
    ApprovalStatus, Constituency, Error, Identity, LoginCredentials, Registrant, Role, SecretHash,
    SignupRequest,
};

const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// [`CredentialStore`] backed by a registrant repository and the partition
/// provisioner.
pub struct CredentialService<R: ?Sized, P: ?Sized> {
    registrants: Arc<R>,
    provisioner: PartitionProvisioner<P>,
}

impl<R, P> CredentialService<R, P>
where
    R: RegistrantRepository + ?Sized,
    P: PartitionRepository + ?Sized,
{
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use voter_registry::domain::{CredentialService, PartitionProvisioner};
    /// # use voter_registry::outbound::memory::{MemoryPartitionRepository, MemoryRegistrantRepository};
    /// let service = CredentialService::new(
    ///     Arc::new(MemoryRegistrantRepository::default()),
    ///     PartitionProvisioner::new(Arc::new(MemoryPartitionRepository::default())),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(registrants: Arc<R>, provisioner: PartitionProvisioner<P>) -> Self {
        Self {
            registrants,
            provisioner,
        }
    }

    async fn transition(
        &self,
        identity: &Identity,
        status: ApprovalStatus,
    ) -> Result<Option<Registrant>, Error> {
        self.registrants
            .set_status(identity, status)
            .await
            .map_err(|err| map_registrant_error("Failed to update user status", &err))
    }
}

#[async_trait]
impl<R, P> CredentialStore for CredentialService<R, P>
where
    R: RegistrantRepository + ?Sized,
    P: PartitionRepository + ?Sized,
{
    async fn register(&self, request: &SignupRequest) -> Result<Registrant, Error> {
        let secret = hash_secret(request.credentials().password()).await?;
        let registrant = Registrant::signup(
            request.identity().clone(),
            secret,
            request.role(),
            request.constituency().clone(),
        );
        self.registrants
            .insert(&registrant)
            .await
            .map_err(|err| match err {
                RegistrantRepositoryError::Duplicate { .. } => Error::conflict(USER_EXISTS),
                other => map_registrant_error("Failed to signup user", &other),
            })?;

        if registrant.role() == Role::Admin {
            self.provisioner.ensure_partition(registrant.identity()).await?;
        }
        info!(
            username = %registrant.identity(),
            role = %registrant.role(),
            status = %registrant.status(),
            "registrant signed up"
        );
        Ok(registrant)
    }

    async fn approve(&self, identity: &Identity) -> Result<Registrant, Error> {
        let registrant = self
            .transition(identity, ApprovalStatus::Accepted)
            .await?
            .ok_or_else(|| Error::not_found("User not found or cannot accept admin users"))?;
        self.provisioner.ensure_partition(registrant.identity()).await?;
        info!(username = %identity, "registrant accepted");
        Ok(registrant)
    }

    async fn reject(&self, identity: &Identity) -> Result<Registrant, Error> {
        let registrant = self
            .transition(identity, ApprovalStatus::Refused)
            .await?
            .ok_or_else(|| Error::not_found("User not found or cannot refuse admin users"))?;
        info!(username = %identity, "registrant refused");
        Ok(registrant)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Registrant, Error> {
        let registrant = self
            .registrants
            .find(credentials.identity())
            .await
            .map_err(|err| map_registrant_error("Login failed", &err))?;
        let verified = match registrant {
            Some(registrant) => verify_secret(&registrant, credentials.password())
                .await?
                .then_some(registrant),
            None => None,
        };
        let Some(registrant) = verified else {
            warn!(username = %credentials.identity(), "login rejected");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        };
        if !registrant.is_accepted() {
            return Err(Error::not_approved("Your signup request is not yet accepted"));
        }
        Ok(registrant)
    }

    async fn list_by_constituency_and_status(
        &self,
        constituency: &Constituency,
        status: ApprovalStatus,
    ) -> Result<Vec<Registrant>, Error> {
        self.registrants
            .list_by_constituency_and_status(constituency, status)
            .await
            .map_err(|err| map_registrant_error("Failed to fetch dashboard data", &err))
    }

    async fn find(&self, identity: &Identity) -> Result<Option<Registrant>, Error> {
        self.registrants
            .find(identity)
            .await
            .map_err(|err| map_registrant_error("Failed to fetch user", &err))
    }
}

// Argon2 is CPU-bound and runs on the blocking pool.
async fn hash_secret(secret: &str) -> Result<SecretHash, Error> {
    let secret = secret.to_owned();
    let hashed = tokio::task::spawn_blocking(move || SecretHash::hash(&secret))
        .await
        .map_err(|err| {
            error!(error = %err, "secret hashing task failed");
            Error::internal("Failed to signup user").with_cause(err)
        })?;
    hashed.map_err(|err| {
        error!(error = %err, "failed to hash signup secret");
        Error::internal("Failed to signup user").with_cause(err)
    })
}

async fn verify_secret(registrant: &Registrant, candidate: &str) -> Result<bool, Error> {
    let secret = registrant.secret().clone();
    let candidate = candidate.to_owned();
    tokio::task::spawn_blocking(move || secret.verify(&candidate))
        .await
        .map_err(|err| {
            error!(error = %err, "secret verification task failed");
            Error::internal("Login failed").with_cause(err)
        })
}

fn map_registrant_error(context: &str, err: &RegistrantRepositoryError) -> Error {
    error!(error = %err, "{context}");
    Error::internal(context).with_cause(err)
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
