//! Port for the registry of provisioned voter partitions.
use async_trait::async_trait;

use crate::domain::{Identity, PartitionName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by partition registry adapters.
    pub enum PartitionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "partition registry connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "partition registry query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartitionRepository: Send + Sync {
    /// Record `name` as owned by `owner`. Registering an existing name is a
    /// no-op and never disturbs records already stored in it.
    async fn register(
        &self,
        name: &PartitionName,
        owner: &Identity,
    ) -> Result<(), PartitionRepositoryError>;

    /// Whether `name` has been registered.
    async fn exists(&self, name: &PartitionName) -> Result<bool, PartitionRepositoryError>;
}
