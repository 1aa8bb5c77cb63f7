//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

/// Session middleware for tests: fresh key, cookie `session`, no `Secure`.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Handler state backed by fresh in-memory repositories.
pub fn memory_state(policy: crate::domain::SessionPolicy) -> super::state::HttpState {
    use std::sync::Arc;

    use crate::domain::{CredentialService, PartitionProvisioner, VoterService};
    use crate::outbound::memory::{
        MemoryPartitionRepository, MemoryRegistrantRepository, MemoryVoterRepository,
    };

    let provisioner = PartitionProvisioner::new(Arc::new(MemoryPartitionRepository::default()));
    super::state::HttpState::new(
        super::state::HttpStatePorts {
            credentials: Arc::new(CredentialService::new(
                Arc::new(MemoryRegistrantRepository::default()),
                provisioner.clone(),
            )),
            voters: Arc::new(VoterService::new(
                Arc::new(MemoryVoterRepository::default()),
                provisioner,
            )),
        },
        policy,
    )
}
