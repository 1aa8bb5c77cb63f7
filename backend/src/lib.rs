//! Voter registry backend library.
//!
//! Layout follows ports and adapters: [`domain`] holds the use-cases and
//! port traits, [`inbound`] the HTTP adapter, [`outbound`] the Diesel and
//! in-memory stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
