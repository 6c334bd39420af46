//! CoinGuard API Server
//!
//! Usage:
//!   cargo run --bin coinguard_api
//!
//! Environment:
//!   PORT / COINGUARD_PORT        - Server port (default: 8000)
//!   COINGUARD_HOST               - Server host (default: 0.0.0.0)
//!   COINGUARD_DB_PATH            - Snapshot cache file (default: cache.db)
//!   COINGUARD_PRIMARY_URL        - Blockchair base URL
//!   COINGUARD_FALLBACK_URL       - blockchain.info base URL
//!   COINGUARD_HTTP_TIMEOUT_SECS  - Per-provider timeout (default: 10)
//!   COINGUARD_ADMIN_KEY          - Enables POST /api/registry
//!   RUST_LOG                     - Log filter (default: info)

use coinguard::utils::constants::{APP_NAME, APP_VERSION};
use coinguard::{create_router, AppConfig, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env();
    let addr = config.socket_addr()?;

    let state = Arc::new(AppState::from_config(&config)?);
    info!(
        "📚 Scam registry loaded: {} addresses",
        state.registry.len()
    );
    info!("💾 Cache database: {}", state.fetcher.store().path().display());

    let app = create_router(state);

    info!("🚀 {} v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!("");
    info!("Endpoints:");
    info!("  POST /api/check           - Address risk check (form field: address)");
    info!("  GET  /api/stats           - Cache and registry counters");
    info!("  GET  /api/registry/stats  - Registry breakdown by type");
    info!("  POST /api/registry        - Add registry entries (X-API-Key)");
    info!("  GET  /health              - Health check");
    info!("");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 {} shutdown complete", APP_NAME);

    Ok(())
}
