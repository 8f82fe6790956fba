//! API Module
//!
//! HTTP handlers and routing for the cache reporting REST API.
//!
//! # Endpoints
//! - `GET /caches` - Summary report for every registered cache
//! - `GET /caches/dump` - Detailed plain-text report (file fallback at 8 MiB)
//! - `GET /caches/:name` - Single cache report with entry metadata
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
