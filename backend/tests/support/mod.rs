//! Shared harness for end-to-end HTTP tests over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use voter_registry::Trace;
use voter_registry::domain::{
    CredentialService, PartitionProvisioner, SessionPolicy, VoterService,
};
use voter_registry::inbound::http::state::{HttpState, HttpStatePorts};
use voter_registry::inbound::http::{api_routes, json_config};
use voter_registry::outbound::memory::{
    MemoryPartitionRepository, MemoryRegistrantRepository, MemoryVoterRepository,
};

pub fn memory_state(policy: SessionPolicy) -> HttpState {
    let provisioner = PartitionProvisioner::new(Arc::new(MemoryPartitionRepository::default()));
    HttpState::new(
        HttpStatePorts {
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

pub async fn registry_app(
    policy: SessionPolicy,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state(policy)))
            .app_data(json_config())
            .wrap(Trace)
            .service(web::scope("/api").wrap(session).configure(api_routes)),
    )
    .await
}

/// Response status, the session cookie if one was set, and the JSON body.
pub struct Reply {
    pub status: StatusCode,
    pub cookie: Option<Cookie<'static>>,
    pub body: Value,
}

pub async fn send<S>(app: &S, request: TestRequest, cookie: Option<&Cookie<'static>>) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    };
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let cookie = response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(Cookie::into_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Reply {
        status,
        cookie,
        body,
    }
}

pub async fn signup<S>(app: &S, username: &str, role: &str, constituency: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        TestRequest::post().uri("/api/signup").set_json(json!({
            "username": username,
            "password": format!("{username}-pw"),
            "role": role,
            "constituency": constituency,
        })),
        None,
    )
    .await
}

pub async fn login<S>(app: &S, username: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        TestRequest::post().uri("/api/login").set_json(json!({
            "username": username,
            "password": format!("{username}-pw"),
        })),
        None,
    )
    .await
}

pub async fn decide<S>(app: &S, admin: &Cookie<'static>, action: &str, username: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        TestRequest::post()
            .uri(&format!("/api/admin/{action}"))
            .set_json(json!({ "username": username })),
        Some(admin),
    )
    .await
}
