//! Service entry-point: loads settings, prepares the SQLite store and serves
//! the JSON endpoints.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mining_insights::config::AppSettings;
use mining_insights::inbound::http::health::HealthState;
use mining_insights::inbound::http::session_config::{BuildMode, session_settings_from_env};
use mining_insights::startup::prepare_store;
use server::{ServerConfig, create_server};

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

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let db_pool = prepare_store(&settings)
        .await
        .wrap_err("failed to prepare database")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session.key, session.cookie_secure, bind_addr, db_pool);
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
