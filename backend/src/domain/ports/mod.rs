//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`CredentialStore`], [`VoterRecords`]) are called by
//! inbound adapters. Driven ports ([`RegistrantRepository`],
//! [`PartitionRepository`], [`VoterRepository`]) are implemented by the
//! Diesel and in-memory outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod partition_repository;
mod registrant_repository;
mod voter_records;
mod voter_repository;

#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::CredentialStore;
#[cfg(test)]
pub use partition_repository::MockPartitionRepository;
pub use partition_repository::{PartitionRepository, PartitionRepositoryError};
#[cfg(test)]
pub use registrant_repository::MockRegistrantRepository;
pub use registrant_repository::{RegistrantRepository, RegistrantRepositoryError};
#[cfg(test)]
pub use voter_records::MockVoterRecords;
pub use voter_records::VoterRecords;
#[cfg(test)]
pub use voter_repository::MockVoterRepository;
pub use voter_repository::{VoterRepository, VoterRepositoryError};
