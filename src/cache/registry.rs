//! Cache Registry Module
//!
//! Process-wide named catalog of bounded caches, used purely for reporting.
//! The registry never creates or destroys caches; it holds non-owning
//! monitor handles registered once at startup.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{BoundedCache, CacheStats};

// == Snapshot Types ==
/// Point-in-time introspection values for a single cache.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    /// Current total estimated size in bytes
    pub current_size_bytes: u64,
    /// Configured byte capacity
    pub capacity_bytes: u64,
    /// Current number of entries
    pub item_count: usize,
    /// Used fraction of the configured capacity
    pub occupancy: f64,
    /// Hit/miss/eviction counters
    pub stats: CacheStats,
}

/// Reporting metadata for a single entry; values are not exposed.
#[derive(Debug, Clone, Serialize)]
pub struct EntryMetadata {
    /// The entry's key
    pub key: String,
    /// Estimated size in bytes
    pub size_bytes: u64,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Last access timestamp (Unix milliseconds)
    pub last_accessed_at: u64,
    /// Number of reads that hit this entry
    pub access_count: u64,
    /// Remaining TTL in milliseconds, if the entry expires
    pub ttl_remaining_ms: Option<u64>,
}

/// One row of the registry report.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    /// Name the cache was registered under
    pub name: String,
    #[serde(flatten)]
    pub snapshot: CacheSnapshot,
}

// == Cache Monitor ==
/// Read-mostly introspection handle the registry keeps per cache.
///
/// Implemented for any shared bounded cache regardless of its value type, so
/// heterogeneous caches can be cataloged side by side.
#[async_trait]
pub trait CacheMonitor: Send + Sync {
    /// Returns current introspection values.
    async fn snapshot(&self) -> CacheSnapshot;

    /// Returns reporting metadata for every entry.
    async fn entry_metadata(&self) -> Vec<EntryMetadata>;

    /// Removes expired entries, returning how many were purged.
    async fn purge_expired(&self) -> usize;
}

#[async_trait]
impl<V> CacheMonitor for RwLock<BoundedCache<V>>
where
    V: Send + Sync + 'static,
{
    async fn snapshot(&self) -> CacheSnapshot {
        let cache = self.read().await;
        CacheSnapshot {
            current_size_bytes: cache.current_size_bytes(),
            capacity_bytes: cache.capacity_bytes(),
            item_count: cache.item_count(),
            occupancy: cache.occupancy(),
            stats: cache.stats(),
        }
    }

    async fn entry_metadata(&self) -> Vec<EntryMetadata> {
        let now = current_timestamp_ms();
        let cache = self.read().await;
        cache
            .items()
            .map(|(key, entry)| EntryMetadata {
                key: key.to_string(),
                size_bytes: entry.size_bytes,
                created_at: entry.created_at,
                last_accessed_at: entry.last_accessed_at,
                access_count: entry.access_count,
                ttl_remaining_ms: entry.ttl_remaining_ms(now),
            })
            .collect()
    }

    async fn purge_expired(&self) -> usize {
        self.write().await.purge_expired()
    }
}

// == Cache Registry ==
/// Named collection of cache monitors with stable registration order.
#[derive(Default)]
pub struct CacheRegistry {
    caches: RwLock<Vec<(String, Arc<dyn CacheMonitor>)>>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Register ==
    /// Registers a cache under a name.
    ///
    /// Idempotent by name: re-registering replaces the monitor handle while
    /// keeping the original position, so report order stays stable.
    pub async fn register(&self, name: impl Into<String>, cache: Arc<dyn CacheMonitor>) {
        let name = name.into();
        let mut caches = self.caches.write().await;
        match caches.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = cache,
            None => caches.push((name, cache)),
        }
    }

    // == Report ==
    /// Returns one report row per registered cache, in registration order.
    ///
    /// Read-only: reporting never mutates the caches it describes.
    pub async fn report(&self) -> Vec<CacheReport> {
        let caches = self.caches.read().await;
        let mut rows = Vec::with_capacity(caches.len());
        for (name, monitor) in caches.iter() {
            rows.push(CacheReport {
                name: name.clone(),
                snapshot: monitor.snapshot().await,
            });
        }
        rows
    }

    /// Returns the report row and entry metadata for one cache by name.
    pub async fn detail(&self, name: &str) -> Option<(CacheReport, Vec<EntryMetadata>)> {
        let monitor = {
            let caches = self.caches.read().await;
            caches
                .iter()
                .find(|(existing, _)| existing == name)
                .map(|(_, monitor)| Arc::clone(monitor))
        }?;

        let report = CacheReport {
            name: name.to_string(),
            snapshot: monitor.snapshot().await,
        };
        Some((report, monitor.entry_metadata().await))
    }

    // == Aggregates ==
    /// Sum of `current_size_bytes` across all registered caches.
    pub async fn total_size_bytes(&self) -> u64 {
        self.report()
            .await
            .iter()
            .map(|row| row.snapshot.current_size_bytes)
            .sum()
    }

    /// Sum of `item_count` across all registered caches.
    pub async fn total_item_count(&self) -> usize {
        self.report()
            .await
            .iter()
            .map(|row| row.snapshot.item_count)
            .sum()
    }

    // == Purge Expired ==
    /// Purges expired entries in every registered cache.
    ///
    /// Returns the total number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let caches = self.caches.read().await;
        let mut removed = 0;
        for (_, monitor) in caches.iter() {
            removed += monitor.purge_expired().await;
        }
        removed
    }
}
