//! Signup, login, logout, and self-service handlers.
//!
//! ```text
//! POST /api/signup {"username":"adminA","password":"pw","role":"admin","constituency":"C1"}
//! POST /api/login  {"username":"adminA","password":"pw"}
//! GET  /api/user
//! GET  /api/user/data
//! POST /api/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    Constituency, Error, LoginCredentials, LoginValidationError, Registrant,
    RegistrantValidationError, Role, SessionSnapshot, SignupRequest, VoterRecord,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_session;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/signup`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupBody {
    #[schema(example = "adminA")]
    pub username: String,
    pub password: String,
    /// `user` (default), `admin`, or `authority`.
    #[serde(default)]
    #[schema(example = "admin")]
    pub role: Option<String>,
    #[schema(example = "C1")]
    pub constituency: String,
}

impl TryFrom<SignupBody> for SignupRequest {
    type Error = Error;

    fn try_from(value: SignupBody) -> Result<Self, Self::Error> {
        let credentials = LoginCredentials::try_from_parts(&value.username, &value.password)
            .map_err(map_login_validation_error)?;
        let role = match value.role.as_deref() {
            None => Role::default(),
            Some(raw) => raw.parse().map_err(|err| field_error(&err, "role"))?,
        };
        let constituency =
            Constituency::new(&value.constituency).map_err(|err| field_error(&err, "constituency"))?;
        Ok(Self::new(credentials, role, constituency))
    }
}

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginBody {
    #[schema(example = "adminA")]
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginBody> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginBody) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// `{message}` acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// `{message, user?}` returned by signup.
#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Registrant>,
}

/// `{message, user}` returned by login and admin decisions.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrantResponse {
    pub message: String,
    pub user: Registrant,
}

/// `{user}` returned by `GET /api/user`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    pub user: SessionSnapshot,
}

/// `{userData}` returned by `GET /api/user/data`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDataResponse {
    pub user_data: Vec<VoterRecord>,
}

fn field_error(err: &RegistrantValidationError, field: &str) -> Error {
    let code = match err {
        RegistrantValidationError::EmptyIdentity | RegistrantValidationError::EmptyConstituency => {
            "empty"
        }
        RegistrantValidationError::IdentityTooLong { .. } => "too_long",
        RegistrantValidationError::IdentityControlCharacters => "control_characters",
        RegistrantValidationError::UnknownRole | RegistrantValidationError::UnknownStatus => {
            "unknown_value"
        }
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::Identity(inner) => field_error(&inner, "username"),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty" })),
    }
}

/// Register a new account.
///
/// Admins are accepted immediately, get their voter partition, and are
/// logged in. Other roles wait for an admin of their constituency.
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupBody,
    responses(
        (status = 201, description = "Signed up", body = SignupResponse),
        (status = 400, description = "Invalid request or user exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let request = SignupRequest::try_from(payload.into_inner())?;
    let registrant = state.credentials.register(&request).await?;
    if registrant.role() == Role::Admin {
        session.persist_snapshot(&SessionSnapshot::capture(&registrant, state.clock.utc()))?;
        return Ok(HttpResponse::Created().json(SignupResponse {
            message: "Admin signup and login successful".to_owned(),
            user: Some(registrant),
        }));
    }
    Ok(HttpResponse::Created().json(SignupResponse {
        message: "Signup request submitted. Awaiting admin approval.".to_owned(),
        user: None,
    }))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = RegistrantResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request or credentials", body = Error),
        (status = 403, description = "Signup not yet accepted", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<RegistrantResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let registrant = state.credentials.authenticate(&credentials).await?;
    session.persist_snapshot(&SessionSnapshot::capture(&registrant, state.clock.utc()))?;
    info!(username = %registrant.identity(), role = %registrant.role(), "login");
    Ok(web::Json(RegistrantResponse {
        message: "Login successful".to_owned(),
        user: registrant,
    }))
}

/// The caller's session snapshot.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "No longer accepted", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CurrentUserResponse>> {
    let user = require_session(&state, &session).await?;
    Ok(web::Json(CurrentUserResponse { user }))
}

/// Every voter record in the caller's partition.
#[utoipa::path(
    get,
    path = "/api/user/data",
    responses(
        (status = 200, description = "Caller's voter records", body = UserDataResponse),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "userData",
    security(("SessionCookie" = []))
)]
#[get("/user/data")]
pub async fn user_data(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserDataResponse>> {
    let caller = require_session(&state, &session).await?;
    let user_data = state.voters.list(caller.identity()).await?;
    Ok(web::Json(UserDataResponse { user_data }))
}

/// End the session and expire the cookie.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> web::Json<MessageResponse> {
    session.purge();
    web::Json(MessageResponse {
        message: "Logout successful".to_owned(),
    })
}
