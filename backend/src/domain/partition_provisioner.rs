//! Idempotent creation of per-registrant voter partitions.

use std::sync::Arc;

use tracing::{debug, error};

use super::ports::{PartitionRepository, PartitionRepositoryError};
use super::{Error, Identity, PartitionName};

/// Ensures each accepted registrant has exactly one partition.
pub struct PartitionProvisioner<P: ?Sized> {
    partitions: Arc<P>,
}

impl<P: ?Sized> Clone for PartitionProvisioner<P> {
    fn clone(&self) -> Self {
        Self {
            partitions: Arc::clone(&self.partitions),
        }
    }
}

impl<P> PartitionProvisioner<P>
where
    P: PartitionRepository + ?Sized,
{
    pub fn new(partitions: Arc<P>) -> Self {
        Self { partitions }
    }

    /// Create the partition owned by `identity` unless it already exists.
    ///
    /// Safe to call repeatedly and concurrently; existing records are kept.
    pub async fn ensure_partition(&self, identity: &Identity) -> Result<PartitionName, Error> {
        let name = PartitionName::for_identity(identity);
        self.partitions
            .register(&name, identity)
            .await
            .map_err(|err| map_partition_error("Failed to provision partition", &err))?;
        debug!(partition = %name, "partition ensured");
        Ok(name)
    }

    /// Whether the partition owned by `identity` has been provisioned.
    pub async fn exists(&self, identity: &Identity) -> Result<bool, Error> {
        let name = PartitionName::for_identity(identity);
        self.partitions
            .exists(&name)
            .await
            .map_err(|err| map_partition_error("Failed to look up partition", &err))
    }
}

fn map_partition_error(context: &str, err: &PartitionRepositoryError) -> Error {
    error!(error = %err, "{context}");
    Error::internal(context).with_cause(err)
}
