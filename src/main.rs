mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;
mod validation;

use std::sync::Arc;

use anyhow::Context;
use config::{Config, StoreKind};
use state::AppState;
use store::{CustomerStore, InMemoryCustomerStore, SpannerCustomerStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("rust-spanner-customers starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store: Arc<dyn CustomerStore> = match (config.customer_store, &config.spanner) {
        (StoreKind::Spanner, Some(spanner)) => {
            Arc::new(SpannerCustomerStore::from_config(spanner).await?)
        }
        (StoreKind::Spanner, None) => anyhow::bail!("Spanner store selected without Spanner settings"),
        (StoreKind::Memory, _) => {
            tracing::warn!("Using in-memory customer store; data is lost on exit");
            Arc::new(InMemoryCustomerStore::new())
        }
    };

    let app = routes::app(AppState::new(store));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("rust-spanner-customers stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
