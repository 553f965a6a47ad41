//! Backend entry-point: loads settings, applies migrations and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use studio_backend::inbound::http::health::HealthState;
use studio_backend::inbound::http::session_config::{
    BuildMode, SessionConfigError, SessionSettings, session_settings_from_env,
};
use studio_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Session cookie settings read from the process environment.
fn session_settings(mode: BuildMode) -> Result<SessionSettings, SessionConfigError> {
    session_settings_from_env(&DefaultEnv::new(), mode)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let session =
        session_settings(BuildMode::current()).wrap_err("invalid session configuration")?;

    let database_url = settings.database_url()?;
    run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply migrations")?;
    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max) = settings.database_max_connections {
        pool_config = pool_config.with_max_size(max);
    }
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let http_state = build_http_state(&settings, &pool)?;
    let bind_addr = settings.bind_addr()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(session, bind_addr, http_state),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;

    info!(%bind_addr, "studio backend listening");
    server.await.wrap_err("server terminated with an error")
}
