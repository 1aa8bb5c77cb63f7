//! Admin handlers: signup decisions and the constituency dashboard.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{ApprovalStatus, Error, Identity, Registrant, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_role;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::RegistrantResponse;

/// Body for `POST /api/admin/accept` and `POST /api/admin/refuse`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DecisionBody {
    #[schema(example = "bob")]
    pub username: String,
}

impl TryFrom<DecisionBody> for Identity {
    type Error = Error;

    fn try_from(value: DecisionBody) -> Result<Self, Self::Error> {
        Identity::new(&value.username).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "username", "code": "invalid_identity" }))
        })
    }
}

/// Registrants of the admin's constituency, split by status.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub pending_users: Vec<Registrant>,
    pub accepted_users: Vec<Registrant>,
}

/// Accept a pending signup and provision its voter partition.
#[utoipa::path(
    post,
    path = "/api/admin/accept",
    request_body = DecisionBody,
    responses(
        (status = 200, description = "Registrant accepted", body = RegistrantResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Unknown or admin registrant", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "acceptRegistrant",
    security(("SessionCookie" = []))
)]
#[post("/admin/accept")]
pub async fn accept(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DecisionBody>,
) -> ApiResult<web::Json<RegistrantResponse>> {
    let admin = require_role(&state, &session, Role::Admin).await?;
    let target = Identity::try_from(payload.into_inner())?;
    let user = state.credentials.approve(&target).await?;
    info!(admin = %admin.identity(), username = %target, "registrant accepted");
    Ok(web::Json(RegistrantResponse {
        message: "User accepted successfully".to_owned(),
        user,
    }))
}

/// Refuse a pending signup.
#[utoipa::path(
    post,
    path = "/api/admin/refuse",
    request_body = DecisionBody,
    responses(
        (status = 200, description = "Registrant refused", body = RegistrantResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Unknown or admin registrant", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "refuseRegistrant",
    security(("SessionCookie" = []))
)]
#[post("/admin/refuse")]
pub async fn refuse(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DecisionBody>,
) -> ApiResult<web::Json<RegistrantResponse>> {
    let admin = require_role(&state, &session, Role::Admin).await?;
    let target = Identity::try_from(payload.into_inner())?;
    let user = state.credentials.reject(&target).await?;
    info!(admin = %admin.identity(), username = %target, "registrant refused");
    Ok(web::Json(RegistrantResponse {
        message: "User refused successfully".to_owned(),
        user,
    }))
}

/// Pending and accepted non-admin registrants in the admin's constituency.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 403, description = "Admin access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDashboard",
    security(("SessionCookie" = []))
)]
#[get("/admin/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    let admin = require_role(&state, &session, Role::Admin).await?;
    let constituency = admin.constituency();
    let pending_users = state
        .credentials
        .list_by_constituency_and_status(constituency, ApprovalStatus::Pending)
        .await?;
    let accepted_users = state
        .credentials
        .list_by_constituency_and_status(constituency, ApprovalStatus::Accepted)
        .await?;
    Ok(web::Json(DashboardResponse {
        pending_users,
        accepted_users,
    }))
}
