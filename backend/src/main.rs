//! Voter registry entry point: loads configuration, prepares the store, and
//! serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use voter_registry::inbound::http::health::HealthState;
use voter_registry::inbound::http::session_config::{BuildMode, session_settings_from_env};
use voter_registry::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use voter_registry::settings::RegistrySettings;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings = RegistrySettings::load().wrap_err("failed to load configuration")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let mut config = ServerConfig::new(session, settings.bind_addr()?)
        .with_allowed_origins(settings.allowed_origins())
        .with_session_policy(settings.session_policy())
        .with_session_ttl_hours(settings.session_ttl_hours()?);

    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(prepare_database(url.to_owned()).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr()?;
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, policy = ?settings.session_policy(), "voter registry listening");
    let result = server.await;
    health_state.mark_draining();
    result.wrap_err("server terminated with an error")
}

/// Apply pending migrations, then open the async pool.
async fn prepare_database(url: String) -> Result<DbPool> {
    let migration_url = url.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply migrations")?;
    info!("database migrations applied");
    DbPool::new(PoolConfig::new(url))
        .await
        .wrap_err("failed to create database pool")
}
