//! Builds the HTTP state from whichever store is configured.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use voter_registry::domain::ports::{PartitionRepository, RegistrantRepository, VoterRepository};
use voter_registry::domain::{CredentialService, PartitionProvisioner, SessionPolicy, VoterService};
use voter_registry::inbound::http::state::{HttpState, HttpStatePorts};
use voter_registry::outbound::memory::{
    MemoryPartitionRepository, MemoryRegistrantRepository, MemoryVoterRepository,
};
use voter_registry::outbound::persistence::{
    DieselPartitionRepository, DieselRegistrantRepository, DieselVoterRepository,
};

use super::ServerConfig;

/// Wire the domain services over one set of driven adapters.
fn ports_over<R, P, V>(registrants: Arc<R>, partitions: Arc<P>, voters: Arc<V>) -> HttpStatePorts
where
    R: RegistrantRepository + 'static,
    P: PartitionRepository + 'static,
    V: VoterRepository + 'static,
{
    let provisioner = PartitionProvisioner::new(partitions);
    HttpStatePorts {
        credentials: Arc::new(CredentialService::new(registrants, provisioner.clone())),
        voters: Arc::new(VoterService::new(voters, provisioner)),
    }
}

fn memory_ports() -> HttpStatePorts {
    ports_over(
        Arc::new(MemoryRegistrantRepository::default()),
        Arc::new(MemoryPartitionRepository::default()),
        Arc::new(MemoryVoterRepository::default()),
    )
}

/// Diesel adapters when a pool is configured, in-memory ones otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL registry store");
            ports_over(
                Arc::new(DieselRegistrantRepository::new(pool.clone())),
                Arc::new(DieselPartitionRepository::new(pool.clone())),
                Arc::new(DieselVoterRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; registry state is kept in memory");
            memory_ports()
        }
    };
    web::Data::new(build_state(ports, config.policy))
}

fn build_state(ports: HttpStatePorts, policy: SessionPolicy) -> HttpState {
    HttpState::new(ports, policy)
}
