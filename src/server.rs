//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, migrations, worker spawning, and the Axum
//! server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::LinkRepository;
use crate::domain::visit_worker::run_visit_worker;
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured store (PostgreSQL pool plus migrations, or in-memory)
/// - The background visit worker
/// - The Axum HTTP server, shut down cleanly on Ctrl-C
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or server bind
/// fail.
pub async fn run(config: Config) -> Result<()> {
    let repo: Arc<dyn LinkRepository> = match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not set")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .connect(url)
                .await
                .context("failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run migrations")?;

            Arc::new(PgLinkRepository::new(Arc::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store, data will not survive a restart");
            Arc::new(MemoryLinkRepository::new())
        }
    };

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);
    tokio::spawn(run_visit_worker(visit_rx, repo.clone()));
    tracing::info!("Visit worker started");

    let state = AppState::build(repo, &config, visit_tx)?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
