//! Memocache - A size-bounded async memoization cache layer
//!
//! Binary entry point: composes the standard cache set, registers it for
//! reporting, and serves the operator-facing monitoring API.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memocache::api::{create_router, AppState};
use memocache::cache::{BoundedCache, CacheRegistry};
use memocache::config::Config;
use memocache::models::{CurrencyRates, Translation};
use memocache::tasks::spawn_sweep_task;

/// Main entry point for the cache monitoring server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct and register the standard cache set
/// 4. Start background expiry sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memocache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Memocache monitoring server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: translation_capacity={}, currency_capacity={}, currency_ttl={}s, color_capacity={}, port={}, sweep_interval={}s",
        config.translation_capacity,
        config.currency_capacity,
        config.currency_ttl,
        config.color_capacity,
        config.server_port,
        config.sweep_interval
    );

    // Construct the standard cache set and register it for reporting
    let translations = BoundedCache::<Translation>::lfu(config.translation_capacity).shared();
    let rates =
        BoundedCache::<CurrencyRates>::ttl(config.currency_capacity, config.currency_ttl).shared();
    let colors = BoundedCache::<u32>::lru(config.color_capacity).shared();

    let registry = Arc::new(CacheRegistry::new());
    registry.register("translation", translations).await;
    registry.register("currency", rates).await;
    registry.register("color", colors).await;
    info!("Registered {} caches", registry.report().await.len());

    // Start background sweep task
    let sweep_handle = spawn_sweep_task(Arc::clone(&registry), config.sweep_interval);
    info!("Background sweep task started");

    // Create router with all endpoints
    let state = AppState::new(registry, config.report_path.clone());
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .unwrap();

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweep task
    sweep_handle.abort();
    warn!("Sweep task aborted");
}
