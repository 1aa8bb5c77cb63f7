//! HTTP inbound adapter exposing the registry's REST endpoints.
//!
//! Handlers translate JSON payloads and session cookies into calls on the
//! driving ports held by [`state::HttpState`]. Everything is mounted under
//! `/api` by the server; health probes sit outside that scope.

use actix_web::web;

use crate::domain::Error;

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod voters;

pub use error::ApiResult;

/// Register every `/api` handler on `cfg`.
///
/// ```
/// use actix_web::{App, web};
/// use voter_registry::inbound::http::api_routes;
///
/// let _app = App::new().service(web::scope("/api").configure(api_routes));
/// ```
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::signup)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::user_data)
        .service(admin::accept)
        .service(admin::refuse)
        .service(admin::dashboard)
        .service(voters::create_voter)
        .service(voters::list_voters)
        .service(voters::get_voter)
        .service(voters::update_voter)
        .service(voters::delete_voter);
}

/// JSON extractor settings: malformed bodies answer with the domain error
/// envelope instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}
