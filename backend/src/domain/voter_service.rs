//! Voter record service scoped to the caller's partition.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use tracing::{debug, error};

use super::partition_provisioner::PartitionProvisioner;
use super::ports::{PartitionRepository, VoterRecords, VoterRepository, VoterRepositoryError};
use super::{Error, Identity, PartitionName, VoterFields, VoterId, VoterRecord};

const VOTER_NOT_FOUND: &str = "Voter not found";

/// [`VoterRecords`] over a voter repository.
///
/// Operations against a partition that was never provisioned behave as if it
/// were empty: reads list nothing, keyed lookups are `not_found`, and
/// inserts are refused with `not_found`.
pub struct VoterService<V: ?Sized, P: ?Sized> {
    voters: Arc<V>,
    provisioner: PartitionProvisioner<P>,
}

impl<V, P> VoterService<V, P>
where
    V: VoterRepository + ?Sized,
    P: PartitionRepository + ?Sized,
{
    pub fn new(voters: Arc<V>, provisioner: PartitionProvisioner<P>) -> Self {
        Self { voters, provisioner }
    }

    /// The caller's partition, or `None` when it has not been provisioned.
    async fn partition(&self, caller: &Identity) -> Result<Option<PartitionName>, Error> {
        if self.provisioner.exists(caller).await? {
            Ok(Some(PartitionName::for_identity(caller)))
        } else {
            debug!(username = %caller, "partition not provisioned");
            Ok(None)
        }
    }

    async fn keyed_partition(&self, caller: &Identity) -> Result<PartitionName, Error> {
        self.partition(caller)
            .await?
            .ok_or_else(|| Error::not_found(VOTER_NOT_FOUND))
    }
}

fn parse_key(key: &str) -> Result<VoterId, Error> {
    key.parse()
        .map_err(|_| Error::invalid_key("Invalid voter ID format"))
}

fn validate(fields: &VoterFields) -> Result<(), Error> {
    fields
        .validate()
        .map_err(|err| Error::invalid_request(err.to_string()))
}

fn map_voter_error(context: &str, err: &VoterRepositoryError) -> Error {
    error!(error = %err, "{context}");
    Error::internal(context).with_cause(err)
}

#[async_trait]
impl<V, P> VoterRecords for VoterService<V, P>
where
    V: VoterRepository + ?Sized,
    P: PartitionRepository + ?Sized,
{
    async fn create(&self, caller: &Identity, fields: VoterFields) -> Result<VoterRecord, Error> {
        validate(&fields)?;
        let partition = self
            .partition(caller)
            .await?
            .ok_or_else(|| Error::not_found("Voter list not found"))?;
        let record = VoterRecord::new(VoterId::random(), fields);
        self.voters
            .insert(&partition, &record)
            .await
            .map_err(|err| map_voter_error("Failed to add voter", &err))?;
        debug!(partition = %partition, voter = %record.id(), "voter added");
        Ok(record)
    }

    async fn list(&self, caller: &Identity) -> Result<Vec<VoterRecord>, Error> {
        let Some(partition) = self.partition(caller).await? else {
            return Ok(Vec::new());
        };
        self.voters
            .list(&partition)
            .await
            .map_err(|err| map_voter_error("Failed to fetch user data", &err))
    }

    async fn list_paged(
        &self,
        caller: &Identity,
        page: PageRequest,
    ) -> Result<Paginated<VoterRecord>, Error> {
        let Some(partition) = self.partition(caller).await? else {
            return Ok(Paginated::new(Vec::new(), 0, page));
        };
        let total = self
            .voters
            .count(&partition)
            .await
            .map_err(|err| map_voter_error("Failed to fetch voters", &err))?;
        let items = self
            .voters
            .page(&partition, page)
            .await
            .map_err(|err| map_voter_error("Failed to fetch voters", &err))?;
        Ok(Paginated::new(items, total, page))
    }

    async fn get(&self, caller: &Identity, key: &str) -> Result<VoterRecord, Error> {
        let id = parse_key(key)?;
        let partition = self.keyed_partition(caller).await?;
        self.voters
            .find(&partition, id)
            .await
            .map_err(|err| map_voter_error("Failed to fetch voter", &err))?
            .ok_or_else(|| Error::not_found(VOTER_NOT_FOUND))
    }

    async fn update(
        &self,
        caller: &Identity,
        key: &str,
        patch: VoterFields,
    ) -> Result<VoterRecord, Error> {
        let id = parse_key(key)?;
        validate(&patch)?;
        let partition = self.keyed_partition(caller).await?;
        self.voters
            .update(&partition, id, &patch)
            .await
            .map_err(|err| map_voter_error("Error updating voter", &err))?
            .ok_or_else(|| Error::not_found(VOTER_NOT_FOUND))
    }

    async fn delete(&self, caller: &Identity, key: &str) -> Result<(), Error> {
        let id = parse_key(key)?;
        let partition = self.keyed_partition(caller).await?;
        let removed = self
            .voters
            .delete(&partition, id)
            .await
            .map_err(|err| map_voter_error("Failed to delete voter", &err))?;
        if removed {
            debug!(partition = %partition, voter = %id, "voter deleted");
            Ok(())
        } else {
            Err(Error::not_found(VOTER_NOT_FOUND))
        }
    }
}

#[cfg(test)]
#[path = "voter_service_tests.rs"]
mod tests;
