//! inventory-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use inventory_gateway::api;
use inventory_gateway::app_state::AppState;
use inventory_gateway::config::{InventoryConfig, LogFormat};
use inventory_gateway::domain::EventBus;
use inventory_gateway::persistence::{InventoryStore, MemoryStore, PostgresStore};
use inventory_gateway::service::InventoryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = InventoryConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(addr = %config.listen_addr, "starting inventory-gateway");

    // Build persistence layer
    let store = open_store(&config).await?;
    tracing::info!(backend = store.backend_name(), "storage ready");

    // Build service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = InventoryService::new(store, event_bus, config.actor.clone());

    // Build router
    let app = api::build_app(AppState::new(service), config.request_timeout());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn open_store(config: &InventoryConfig) -> anyhow::Result<Arc<dyn InventoryStore>> {
    if !config.persistence_enabled {
        tracing::warn!("persistence disabled, data lives in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(config.database_connect_timeout())
        .connect(&config.database_url)
        .await
        .context("connecting to PostgreSQL")?;

    let store = PostgresStore::new(pool);
    store.migrate().await.context("running migrations")?;
    Ok(Arc::new(store))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
