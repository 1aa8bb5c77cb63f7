//! Domain primitives, services, and ports.
//!
//! Purpose: model registrants, partitions, and voter records as strongly
//! typed values, and implement the credential and voter use-cases behind
//! driving ports. Nothing here depends on actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Registrant, Identity, Role, ApprovalStatus, Constituency.
//! - PartitionName: injective per-identity partition naming.
//! - VoterRecord, VoterFields, VoterId.
//! - SessionSnapshot, SessionPolicy.
//! - CredentialService, VoterService, PartitionProvisioner.

pub mod auth;
pub mod authorization;
mod credential_service;
pub mod error;
mod partition;
mod partition_provisioner;
pub mod ports;
mod registrant;
mod session;
pub mod trace_id;
mod voter;
mod voter_service;

pub use self::auth::{LoginCredentials, LoginValidationError, SecretHash, SecretHashError, SignupRequest};
pub use self::credential_service::CredentialService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::partition::PartitionName;
pub use self::partition_provisioner::PartitionProvisioner;
pub use self::registrant::{
    ApprovalStatus, Constituency, IDENTITY_MAX, Identity, Registrant, RegistrantValidationError,
    Role,
};
pub use self::session::{SessionPolicy, SessionPolicyParseError, SessionSnapshot};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::voter::{VoterFields, VoterId, VoterKeyError, VoterRecord, VoterValidationError};
pub use self::voter_service::VoterService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use voter_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Access denied"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
