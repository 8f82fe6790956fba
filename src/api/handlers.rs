//! API Handlers
//!
//! HTTP request handlers for the cache reporting surface.

use std::path::{Path as FilePath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::cache::{CacheReport, CacheRegistry, EntryMetadata};
use crate::error::{CacheError, Result};
use crate::models::{
    CacheDetailResponse, HealthResponse, RegistryReportResponse, ReportSavedResponse,
};

/// Detailed reports at or above this size are persisted to disk instead of
/// being sent inline.
pub const REPORT_INLINE_LIMIT: usize = 8 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide cache catalog
    pub registry: Arc<CacheRegistry>,
    /// Destination for oversized detailed reports
    pub report_path: PathBuf,
}

impl AppState {
    /// Creates a new AppState over the given registry.
    pub fn new(registry: Arc<CacheRegistry>, report_path: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            report_path: report_path.into(),
        }
    }
}

/// Handler for GET /caches
///
/// Returns the summary report for every registered cache plus totals.
pub async fn report_handler(State(state): State<AppState>) -> Json<RegistryReportResponse> {
    let rows = state.registry.report().await;
    Json(RegistryReportResponse::new(rows))
}

/// Handler for GET /caches/:name
///
/// Returns one cache's report together with its per-entry metadata.
pub async fn cache_detail_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CacheDetailResponse>> {
    let (report, entries) = state
        .registry
        .detail(&name)
        .await
        .ok_or(CacheError::UnknownCache(name))?;

    Ok(Json(CacheDetailResponse { report, entries }))
}

/// Handler for GET /caches/dump
///
/// Builds the full plain-text report. Reports at or above the inline limit
/// are written to the configured file and a summary notice is returned
/// instead; the report itself is never truncated.
pub async fn dump_handler(State(state): State<AppState>) -> Result<Response> {
    let rows = state.registry.report().await;
    let mut sections = Vec::with_capacity(rows.len());

    for row in &rows {
        let entries = state
            .registry
            .detail(&row.name)
            .await
            .map(|(_, entries)| entries)
            .unwrap_or_default();
        sections.push(format_cache_section(row, &entries));
    }

    let total_size_bytes: u64 = rows.iter().map(|r| r.snapshot.current_size_bytes).sum();
    let total_item_count: usize = rows.iter().map(|r| r.snapshot.item_count).sum();

    let mut text = sections.join("\n");
    text.push_str(&format!(
        "\n- Total Size: {}\n- Total Items: {}\n",
        format_mb(total_size_bytes),
        total_item_count
    ));

    if text.len() >= REPORT_INLINE_LIMIT {
        persist_report(&state.report_path, &text).await?;
        warn!(
            path = %state.report_path.display(),
            bytes = text.len(),
            "detailed report too large to send inline, persisted to disk"
        );
        let notice = ReportSavedResponse {
            message: "The report was too large to send inline, it has been saved to disk."
                .to_string(),
            path: state.report_path.display().to_string(),
            total_size_bytes,
            total_item_count,
        };
        return Ok(Json(notice).into_response());
    }

    Ok(text.into_response())
}

/// Handler for GET /health
///
/// Returns health status of the reporting server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Report Formatting ==
/// Formats one cache's section of the plain-text report.
fn format_cache_section(row: &CacheReport, entries: &[EntryMetadata]) -> String {
    let mut section = format!(
        "- {}\n+ Size: {} / {}\n+ Items: {}\n+ Hit Rate: {:.2}\n",
        row.name,
        format_mb(row.snapshot.current_size_bytes),
        format_mb(row.snapshot.capacity_bytes),
        row.snapshot.item_count,
        row.snapshot.stats.hit_rate(),
    );

    for entry in entries {
        section.push_str(&format!(
            "  {} ({} B, {} reads)\n",
            entry.key, entry.size_bytes, entry.access_count
        ));
    }

    section
}

/// Formats a byte count as mebibytes.
fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Writes an oversized report to disk, creating the parent directory.
async fn persist_report(path: &FilePath, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CacheError::Internal(format!("failed to create report dir: {e}")))?;
    }
    tokio::fs::write(path, text)
        .await
        .map_err(|e| CacheError::Internal(format!("failed to persist report: {e}")))?;

    info!(path = %path.display(), "persisted detailed cache report");
    Ok(())
}
