//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports,
//! so tests can swap in in-memory or mocked services.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::SessionPolicy;
use crate::domain::ports::{CredentialStore, VoterRecords};

/// Driving ports used by the handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub credentials: Arc<dyn CredentialStore>,
    pub voters: Arc<dyn VoterRecords>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub credentials: Arc<dyn CredentialStore>,
    pub voters: Arc<dyn VoterRecords>,
    /// How much a stored session snapshot is trusted.
    pub policy: SessionPolicy,
    /// Stamps `issuedAt` on new snapshots.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// ```
    /// use std::sync::Arc;
    ///
    /// use voter_registry::domain::SessionPolicy;
    /// use voter_registry::inbound::http::state::{HttpState, HttpStatePorts};
    /// use voter_registry::outbound::memory::{
    ///     MemoryPartitionRepository, MemoryRegistrantRepository, MemoryVoterRepository,
    /// };
    /// use voter_registry::domain::{CredentialService, PartitionProvisioner, VoterService};
    ///
    /// let provisioner = PartitionProvisioner::new(Arc::new(MemoryPartitionRepository::default()));
    /// let ports = HttpStatePorts {
    ///     credentials: Arc::new(CredentialService::new(
    ///         Arc::new(MemoryRegistrantRepository::default()),
    ///         provisioner.clone(),
    ///     )),
    ///     voters: Arc::new(VoterService::new(
    ///         Arc::new(MemoryVoterRepository::default()),
    ///         provisioner,
    ///     )),
    /// };
    /// let state = HttpState::new(ports, SessionPolicy::Revalidate);
    /// assert_eq!(state.policy, SessionPolicy::Revalidate);
    /// ```
    pub fn new(ports: HttpStatePorts, policy: SessionPolicy) -> Self {
        let HttpStatePorts { credentials, voters } = ports;
        Self {
            credentials,
            voters,
            policy,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the clock used to stamp snapshots.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
