//! Parking service entry-point: loads settings, prepares storage and serves
//! the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use parking::inbound::http::health::HealthState;
use parking::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use parking::settings::ParkingSettings;
use server::{ServerConfig, create_server};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
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

    let settings = ParkingSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("load settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("bind address", err))?;
    let deadline = settings
        .repository_deadline()
        .map_err(|err| startup_error("repository timeout", err))?;

    let mut config = ServerConfig::new(bind_addr)
        .with_capacity(settings.capacity())
        .with_last_issued(settings.last_issued())
        .with_deadline(deadline);

    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .map_err(|err| startup_error("database migrations", err))?;
        let pool_config = PoolConfig::new(url)
            .with_max_size(settings.db_max_connections)
            .with_checkout_timeout(deadline.limit());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|err| startup_error("database pool", err))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "parking service listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
