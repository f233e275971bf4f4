//! Exercise tracker entry-point: loads settings, prepares storage and serves
//! the REST API until SIGINT or SIGTERM.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_tracker::inbound::http::health::HealthState;
use exercise_tracker::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use exercise_tracker::settings::TrackerSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

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

    let settings = TrackerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(database_url, &settings).await?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::prometheus()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    info!(%bind_addr, "exercise tracker listening");

    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received; draining connections");
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await
}

/// Apply migrations, then open the connection pool.
async fn connect(database_url: &str, settings: &TrackerSettings) -> std::io::Result<DbPool> {
    let applied = run_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");

    let max_size = settings.pool_max_size().map_err(std::io::Error::other)?;
    let pool_config = PoolConfig::new(database_url).with_max_size(max_size);
    DbPool::new(pool_config).await.map_err(std::io::Error::other)
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(error) => {
            warn!(%error, "SIGTERM handler unavailable; listening for Ctrl-C only");
            if let Err(error) = tokio::signal::ctrl_c().await {
                warn!(%error, "Ctrl-C handler failed");
            }
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Ctrl-C handler failed");
    }
}
