//! paimond: Paimon player lookup daemon.
//!
//! Serves `GET /api/enka-player` with an in-memory cache in front of
//! Enka.Network.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use paimon::server::config::{Config, Mode};
use paimon::server::{AppState, router};
use paimon::{MemoryPlayerCache, PaimonError};

/// Paimon daemon serving cached player profile lookups.
#[derive(Parser)]
#[command(name = "paimond")]
#[command(version = paimon::PKG_VERSION)]
#[command(about = "Paimon player lookup daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("paimon=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let mode = Mode::from_env();

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| PaimonError::Configuration(format!("Invalid address: {e}")))?;

    let cache_config = config.cache_config();
    let cache = Arc::new(MemoryPlayerCache::with_sweeper(&cache_config));
    let client = Arc::new(config.client_builder(mode).build()?);

    let state = AppState::new(cache.clone(), client, cache_config.ttl);
    let app = router(state);

    info!(version = paimon::version_string(), %addr, ?mode, "paimond starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache.stop_sweeper();
    info!("paimond stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
