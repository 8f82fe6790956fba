//! Response DTOs for the reporting API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheReport, EntryMetadata};

/// Response body for the registry summary (GET /caches)
#[derive(Debug, Clone, Serialize)]
pub struct RegistryReportResponse {
    /// One row per registered cache, in registration order
    pub caches: Vec<CacheReport>,
    /// Sum of current sizes across all caches
    pub total_size_bytes: u64,
    /// Sum of item counts across all caches
    pub total_item_count: usize,
}

impl RegistryReportResponse {
    /// Creates a new RegistryReportResponse, computing the aggregates.
    pub fn new(caches: Vec<CacheReport>) -> Self {
        let total_size_bytes = caches.iter().map(|c| c.snapshot.current_size_bytes).sum();
        let total_item_count = caches.iter().map(|c| c.snapshot.item_count).sum();
        Self {
            caches,
            total_size_bytes,
            total_item_count,
        }
    }
}

/// Response body for a single cache (GET /caches/:name)
#[derive(Debug, Clone, Serialize)]
pub struct CacheDetailResponse {
    #[serde(flatten)]
    pub report: CacheReport,
    /// Per-entry reporting metadata
    pub entries: Vec<EntryMetadata>,
}

/// Response body when a detailed report was persisted instead of sent inline
#[derive(Debug, Clone, Serialize)]
pub struct ReportSavedResponse {
    /// Explanation of the fallback
    pub message: String,
    /// Where the report was written
    pub path: String,
    /// Sum of current sizes across all caches
    pub total_size_bytes: u64,
    /// Sum of item counts across all caches
    pub total_item_count: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
