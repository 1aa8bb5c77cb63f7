//! Port for voter record storage, scoped by partition.
use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{PartitionName, VoterFields, VoterId, VoterRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by voter repository adapters.
    pub enum VoterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "voter repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "voter repository query failed: {message}",
    }
}

/// Driven port over voter records.
///
/// Every call names the partition it targets; adapters never read or write
/// records outside that partition. Listings are ordered by insertion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoterRepository: Send + Sync {
    async fn insert(
        &self,
        partition: &PartitionName,
        record: &VoterRecord,
    ) -> Result<(), VoterRepositoryError>;

    async fn list(&self, partition: &PartitionName) -> Result<Vec<VoterRecord>, VoterRepositoryError>;

    /// One page of records, skipping `page.offset()` and taking `page.limit()`.
    async fn page(
        &self,
        partition: &PartitionName,
        page: PageRequest,
    ) -> Result<Vec<VoterRecord>, VoterRepositoryError>;

    async fn count(&self, partition: &PartitionName) -> Result<u64, VoterRepositoryError>;

    async fn find(
        &self,
        partition: &PartitionName,
        id: VoterId,
    ) -> Result<Option<VoterRecord>, VoterRepositoryError>;

    /// Overwrite the fields present in `patch` and return the updated record,
    /// or `None` if `id` is absent.
    async fn update(
        &self,
        partition: &PartitionName,
        id: VoterId,
        patch: &VoterFields,
    ) -> Result<Option<VoterRecord>, VoterRepositoryError>;

    /// Remove a record; `false` if it was absent.
    async fn delete(&self, partition: &PartitionName, id: VoterId) -> Result<bool, VoterRepositoryError>;
}
