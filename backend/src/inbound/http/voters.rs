//! Voter record handlers.
//!
//! Every route works on the caller's own partition. Role requirements:
//! listing and reading need any session, creating and deleting need an
//! admin, updating accepts an admin or an authority.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageQuery;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, Role, VoterFields, VoterRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{require_any_role, require_role, require_session};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::MessageResponse;

/// `{message, voter}` returned on creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedVoterResponse {
    pub message: String,
    pub voter: VoterRecord,
}

/// One page of voters plus the page count.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoterPageResponse {
    pub voters: Vec<VoterRecord>,
    pub total_pages: u64,
}

/// `{voter}` returned after an update.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedVoterResponse {
    pub voter: VoterRecord,
}

/// Add a voter to the caller's partition.
#[utoipa::path(
    post,
    path = "/api/voters",
    request_body = VoterFields,
    responses(
        (status = 201, description = "Voter added", body = CreatedVoterResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Voter list not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["voters"],
    operation_id = "createVoter",
    security(("SessionCookie" = []))
)]
#[post("/voters")]
pub async fn create_voter(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<VoterFields>,
) -> ApiResult<HttpResponse> {
    let caller = require_role(&state, &session, Role::Admin).await?;
    let voter = state
        .voters
        .create(caller.identity(), payload.into_inner())
        .await?;
    info!(username = %caller.identity(), voter = %voter.id(), "voter added");
    Ok(HttpResponse::Created().json(CreatedVoterResponse {
        message: "Voter added successfully".to_owned(),
        voter,
    }))
}

/// Page through the caller's voters in insertion order.
///
/// `page` and `limit` default to 1 and 10 when absent, non-numeric, or
/// below one.
#[utoipa::path(
    get,
    path = "/api/voters",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Voter page", body = VoterPageResponse),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["voters"],
    operation_id = "listVoters",
    security(("SessionCookie" = []))
)]
#[get("/voters")]
pub async fn list_voters(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<VoterPageResponse>> {
    let caller = require_session(&state, &session).await?;
    let page = state
        .voters
        .list_paged(caller.identity(), query.into_inner().into_request())
        .await?;
    let total_pages = page.total_pages();
    Ok(web::Json(VoterPageResponse {
        voters: page.into_items(),
        total_pages,
    }))
}

/// Fetch one voter by key.
#[utoipa::path(
    get,
    path = "/api/voters/{id}",
    params(("id" = String, Path, description = "Voter key")),
    responses(
        (status = 200, description = "Voter", body = VoterRecord),
        (status = 400, description = "Malformed key", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 404, description = "Voter not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["voters"],
    operation_id = "getVoter",
    security(("SessionCookie" = []))
)]
#[get("/voters/{id}")]
pub async fn get_voter(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VoterRecord>> {
    let caller = require_session(&state, &session).await?;
    let voter = state.voters.get(caller.identity(), &path).await?;
    Ok(web::Json(voter))
}

/// Merge the supplied fields into a voter.
#[utoipa::path(
    put,
    path = "/api/voters/{id}",
    params(("id" = String, Path, description = "Voter key")),
    request_body = VoterFields,
    responses(
        (status = 200, description = "Updated voter", body = UpdatedVoterResponse),
        (status = 400, description = "Malformed key or invalid fields", body = Error),
        (status = 403, description = "Access denied", body = Error),
        (status = 404, description = "Voter not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["voters"],
    operation_id = "updateVoter",
    security(("SessionCookie" = []))
)]
#[put("/voters/{id}")]
pub async fn update_voter(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<VoterFields>,
) -> ApiResult<web::Json<UpdatedVoterResponse>> {
    let caller = require_any_role(&state, &session, &[Role::Admin, Role::Authority]).await?;
    let voter = state
        .voters
        .update(caller.identity(), &path, payload.into_inner())
        .await?;
    Ok(web::Json(UpdatedVoterResponse { voter }))
}

/// Remove a voter.
#[utoipa::path(
    delete,
    path = "/api/voters/{id}",
    params(("id" = String, Path, description = "Voter key")),
    responses(
        (status = 200, description = "Voter deleted", body = MessageResponse),
        (status = 400, description = "Malformed key", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Voter not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["voters"],
    operation_id = "deleteVoter",
    security(("SessionCookie" = []))
)]
#[delete("/voters/{id}")]
pub async fn delete_voter(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let caller = require_role(&state, &session, Role::Admin).await?;
    state.voters.delete(caller.identity(), &path).await?;
    info!(username = %caller.identity(), voter = %path.as_str(), "voter deleted");
    Ok(web::Json(MessageResponse {
        message: "Voter deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
#[path = "voters_tests.rs"]
mod tests;
