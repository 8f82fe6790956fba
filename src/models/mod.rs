//! Models for the reporting API and standard caches
//!
//! Response DTOs for the HTTP reporting surface and the value shapes stored
//! by the standard caches.

pub mod responses;
pub mod values;

// Re-export commonly used types
pub use responses::{
    CacheDetailResponse, HealthResponse, RegistryReportResponse, ReportSavedResponse,
};
pub use values::{CurrencyRates, Translation};
