//! Backend entry-point: loads settings, wires storage, and serves search.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use social_backend::config::{SearchSettings, ServerSettings};
use social_backend::inbound::http::health::HealthState;
use social_backend::outbound::persistence::{DbPool, run_pending_migrations};

use server::{ServerConfig, create_server};

fn other_error(context: &str, error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {error}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let server_settings =
        ServerSettings::load().map_err(|e| other_error("failed to load server settings", e))?;
    let search_settings =
        SearchSettings::load().map_err(|e| other_error("failed to load search settings", e))?;
    let policy = search_settings
        .policy()
        .map_err(|e| other_error("invalid search settings", e))?;
    let bind_addr = server_settings
        .bind_addr()
        .map_err(|e| other_error("invalid bind address", e))?;

    let mut config = ServerConfig::new(bind_addr, policy);
    match server_settings.pool_config() {
        Some(pool_config) => {
            let applied = run_pending_migrations(pool_config.database_url().to_owned())
                .await
                .map_err(|e| other_error("database migrations failed", e))?;
            info!(applied = applied.len(), "database schema up to date");
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|e| other_error("database pool failed", e))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; serving an empty in-memory directory"),
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::prometheus_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "user search server listening");
    health_state.mark_ready();
    server.await
}
