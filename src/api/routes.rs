//! API Routes
//!
//! Configures the Axum router with all reporting endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_detail_handler, dump_handler, health_handler, report_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /caches` - Summary report for every registered cache
/// - `GET /caches/dump` - Detailed plain-text report (file fallback at 8 MiB)
/// - `GET /caches/:name` - Single cache report with entry metadata
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/caches", get(report_handler))
        .route("/caches/dump", get(dump_handler))
        .route("/caches/:name", get(cache_detail_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
