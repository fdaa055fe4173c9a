//! Backend entry-point: loads settings, prepares storage, and serves the REST API.

mod server;

use std::io;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use course_enrollment::inbound::http::health::HealthState;
use course_enrollment::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use course_enrollment::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr).with_seed_catalogue(settings.seed_catalogue);

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            run_migrations(database_url)
                .await
                .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config).await?.await
}
