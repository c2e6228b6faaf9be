//! Living Graph - metabolic knowledge-graph memory server
//!
//! Standalone server: capture thoughts over HTTP, let an external language
//! model extract semantic tags, and watch relevance decay, compete and
//! reinforce over time.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use living_graph::config::ServerConfig;
use living_graph::handlers::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Living Graph server...");

    let config = ServerConfig::from_env();
    let decay_interval = config.decay_interval;
    let port = config.port;

    let state = Arc::new(AppState::new(config)?);

    // The decay timer is just another writer on the same lock as the
    // handlers, so ticks serialize with resolution and boosts.
    let decay_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(decay_interval);
        // First tick fires immediately; skip it so a fresh thought is not
        // taxed at t=0.
        interval.tick().await;
        loop {
            interval.tick().await;
            decay_state.store.write().tick(chrono::Utc::now());
            decay_state.persist();
        }
    });

    let state_for_shutdown = Arc::clone(&state);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Final snapshot and flush before exit.
    state_for_shutdown.persist();
    if let Err(e) = state_for_shutdown.blobs.flush() {
        tracing::error!(error = %e, "final flush failed");
    }
    info!("Server shutdown complete");

    Ok(())
}

/// Handle graceful shutdown on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
