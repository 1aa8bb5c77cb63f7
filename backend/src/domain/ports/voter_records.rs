//! Driving port for voter record use-cases.
//!
//! Every operation is scoped to the caller's own partition. Record keys
//! arrive raw from the transport and are validated before any storage
//! access.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use crate::domain::{Error, Identity, VoterFields, VoterRecord};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoterRecords: Send + Sync {
    /// Store a new record under a generated key.
    async fn create(&self, caller: &Identity, fields: VoterFields) -> Result<VoterRecord, Error>;

    /// Every record in the caller's partition.
    async fn list(&self, caller: &Identity) -> Result<Vec<VoterRecord>, Error>;

    async fn list_paged(
        &self,
        caller: &Identity,
        page: PageRequest,
    ) -> Result<Paginated<VoterRecord>, Error>;

    async fn get(&self, caller: &Identity, key: &str) -> Result<VoterRecord, Error>;

    /// Merge `patch` into the stored record and return the result.
    async fn update(
        &self,
        caller: &Identity,
        key: &str,
        patch: VoterFields,
    ) -> Result<VoterRecord, Error>;

    async fn delete(&self, caller: &Identity, key: &str) -> Result<(), Error>;
}
