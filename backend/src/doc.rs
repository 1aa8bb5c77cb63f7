//! OpenAPI document for the registry.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ApprovalStatus, Error, ErrorCode, Registrant, Role, SessionSnapshot, VoterFields, VoterRecord};
use crate::inbound::http::admin::{DashboardResponse, DecisionBody};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::users::{
    CurrentUserResponse, LoginBody, MessageResponse, RegistrantResponse, SignupBody,
    SignupResponse, UserDataResponse,
};
use crate::inbound::http::voters::{CreatedVoterResponse, UpdatedVoterResponse, VoterPageResponse};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by POST /api/login or admin signup.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Voter registry API",
        description = "Signup approval per constituency and per-user voter record management."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::user_data,
        crate::inbound::http::admin::accept,
        crate::inbound::http::admin::refuse,
        crate::inbound::http::admin::dashboard,
        crate::inbound::http::voters::create_voter,
        crate::inbound::http::voters::list_voters,
        crate::inbound::http::voters::get_voter,
        crate::inbound::http::voters::update_voter,
        crate::inbound::http::voters::delete_voter,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        ApprovalStatus,
        Registrant,
        SessionSnapshot,
        VoterFields,
        VoterRecord,
        SignupBody,
        SignupResponse,
        LoginBody,
        RegistrantResponse,
        MessageResponse,
        CurrentUserResponse,
        UserDataResponse,
        DecisionBody,
        DashboardResponse,
        CreatedVoterResponse,
        VoterPageResponse,
        UpdatedVoterResponse,
        ProbeStatus,
    )),
    tags(
        (name = "users", description = "Signup, login, and the caller's own data"),
        (name = "admin", description = "Signup decisions and the constituency dashboard"),
        (name = "voters", description = "Voter records in the caller's partition"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;
