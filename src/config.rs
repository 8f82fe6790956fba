//! Configuration Module
//!
//! Handles loading and managing process configuration from environment variables.

use std::env;

/// Process configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Capacities are byte budgets, not item counts.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte capacity of the translation LFU cache
    pub translation_capacity: u64,
    /// Byte capacity of the currency TTL cache
    pub currency_capacity: u64,
    /// TTL in seconds for currency cache entries
    pub currency_ttl: u64,
    /// Byte capacity of the color LRU cache
    pub color_capacity: u64,
    /// HTTP server port for the reporting API
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// File an oversized detailed report is persisted to
    pub report_path: String,
}

/// Default byte capacity shared by the standard caches (100 MiB).
pub const DEFAULT_CAPACITY_BYTES: u64 = 100 * 1024 * 1024;

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TRANSLATION_CACHE_CAPACITY` - Translation cache bytes (default: 104857600)
    /// - `CURRENCY_CACHE_CAPACITY` - Currency cache bytes (default: 104857600)
    /// - `CURRENCY_CACHE_TTL` - Currency entry TTL in seconds (default: 86400)
    /// - `COLOR_CACHE_CAPACITY` - Color cache bytes (default: 104857600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    /// - `REPORT_PATH` - Oversized report destination (default: logs/cache_info.txt)
    pub fn from_env() -> Self {
        Self {
            translation_capacity: env::var("TRANSLATION_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY_BYTES),
            currency_capacity: env::var("CURRENCY_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY_BYTES),
            currency_ttl: env::var("CURRENCY_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400),
            color_capacity: env::var("COLOR_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY_BYTES),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            report_path: env::var("REPORT_PATH")
                .unwrap_or_else(|_| "logs/cache_info.txt".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translation_capacity: DEFAULT_CAPACITY_BYTES,
            currency_capacity: DEFAULT_CAPACITY_BYTES,
            currency_ttl: 86400,
            color_capacity: DEFAULT_CAPACITY_BYTES,
            server_port: 3000,
            sweep_interval: 60,
            report_path: "logs/cache_info.txt".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.translation_capacity, DEFAULT_CAPACITY_BYTES);
        assert_eq!(config.currency_capacity, DEFAULT_CAPACITY_BYTES);
        assert_eq!(config.currency_ttl, 86400);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.report_path, "logs/cache_info.txt");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("TRANSLATION_CACHE_CAPACITY");
        env::remove_var("CURRENCY_CACHE_CAPACITY");
        env::remove_var("CURRENCY_CACHE_TTL");
        env::remove_var("COLOR_CACHE_CAPACITY");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("REPORT_PATH");

        let config = Config::from_env();
        assert_eq!(config.translation_capacity, DEFAULT_CAPACITY_BYTES);
        assert_eq!(config.currency_ttl, 86400);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 60);
    }
}
