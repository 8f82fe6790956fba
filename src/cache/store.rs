//! Bounded Cache Module
//!
//! Main cache engine: a key-value store bounded by total estimated byte size
//! rather than item count, delegating victim selection to an eviction policy.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{size, CacheEntry, CacheStats, EvictionPolicy};

/// A size-bounded cache shared across async callers.
pub type SharedCache<V> = Arc<RwLock<BoundedCache<V>>>;

// == Bounded Cache ==
/// Key-value store bounded by total estimated byte size.
///
/// Invariants: `current_bytes` equals the sum of all entry sizes at all
/// times, and never exceeds `capacity_bytes` after a mutating operation
/// completes unless a single entry alone is larger than the capacity.
#[derive(Debug)]
pub struct BoundedCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Victim-selection strategy
    policy: EvictionPolicy,
    /// Maximum total estimated size in bytes
    capacity_bytes: u64,
    /// Current total estimated size in bytes
    current_bytes: u64,
    /// Next insertion sequence number
    next_seq: u64,
    /// Performance statistics
    stats: CacheStats,
}

impl<V> BoundedCache<V> {
    // == Constructors ==
    /// Creates a new cache with the given byte capacity and eviction policy.
    pub fn new(capacity_bytes: u64, policy: EvictionPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            capacity_bytes,
            current_bytes: 0,
            next_seq: 0,
            stats: CacheStats::new(),
        }
    }

    /// Creates a least-recently-used cache.
    pub fn lru(capacity_bytes: u64) -> Self {
        Self::new(capacity_bytes, EvictionPolicy::Lru)
    }

    /// Creates a least-frequently-used cache.
    pub fn lfu(capacity_bytes: u64) -> Self {
        Self::new(capacity_bytes, EvictionPolicy::Lfu)
    }

    /// Creates a time-to-live cache.
    pub fn ttl(capacity_bytes: u64, ttl_seconds: u64) -> Self {
        Self::new(capacity_bytes, EvictionPolicy::Ttl { ttl_seconds })
    }

    /// Wraps the cache for shared async access.
    pub fn shared(self) -> SharedCache<V> {
        Arc::new(RwLock::new(self))
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns None if the key is missing or its entry has expired; expired
    /// entries are purged on the spot. A hit runs the policy's access
    /// bookkeeping.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = current_timestamp_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => self.policy.is_expired(entry, now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            if let Some(old) = self.entries.remove(key) {
                self.current_bytes -= old.size_bytes;
            }
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        let policy = self.policy;
        match self.entries.get_mut(key) {
            Some(entry) => {
                policy.on_access(entry, now);
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => None,
        }
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// Any prior entry for the key is replaced and its size subtracted. The
    /// new value's size is estimated, the entry inserted, and the eviction
    /// loop runs synchronously until the cache fits its capacity again.
    /// Insertion never fails: a value larger than the whole capacity evicts
    /// everything else and stays as the sole, oversized entry.
    pub fn put(&mut self, key: impl Into<String>, value: V)
    where
        V: Serialize,
    {
        let key = key.into();
        let now = current_timestamp_ms();
        let size_bytes = size::estimate(&value);

        if let Some(old) = self.entries.remove(&key) {
            self.current_bytes -= old.size_bytes;
        }

        let mut entry = CacheEntry::new(value, size_bytes, now, self.next_seq);
        self.next_seq += 1;
        self.policy.on_insert(&mut entry, now);

        self.current_bytes += size_bytes;
        self.entries.insert(key.clone(), entry);

        self.evict_to_capacity(&key, now);
    }

    // == Eviction Loop ==
    /// Evicts victims until the cache fits its capacity.
    ///
    /// The just-inserted key is not a candidate; once it is the only entry
    /// left the loop stops even if the cache is still over capacity.
    fn evict_to_capacity(&mut self, inserted: &str, now_ms: u64) {
        while self.current_bytes > self.capacity_bytes {
            let victim = self.policy.select_victim(
                self.entries.iter().filter(|(k, _)| k.as_str() != inserted),
                now_ms,
            );

            match victim {
                Some(victim_key) => {
                    if let Some(old) = self.entries.remove(&victim_key) {
                        self.current_bytes -= old.size_bytes;
                    }
                    self.stats.record_eviction();
                }
                None => break,
            }
        }
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let old = self.entries.remove(key)?;
        self.current_bytes -= old.size_bytes;
        Some(old.value)
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed; always 0 for caches whose
    /// policy never expires entries.
    pub fn purge_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| self.policy.is_expired(entry, now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            if let Some(old) = self.entries.remove(&key) {
                self.current_bytes -= old.size_bytes;
            }
            self.stats.record_expiration();
        }

        count
    }

    // == Items ==
    /// Read-only snapshot of all entries for reporting.
    ///
    /// Does not evict and does not touch recency or frequency bookkeeping.
    pub fn items(&self) -> impl Iterator<Item = (&str, &CacheEntry<V>)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    // == Introspection ==
    /// Returns the current total estimated size in bytes.
    pub fn current_size_bytes(&self) -> u64 {
        self.current_bytes
    }

    /// Returns the configured byte capacity.
    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    /// Returns the current number of entries.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the used fraction of the configured capacity.
    pub fn occupancy(&self) -> f64 {
        if self.capacity_bytes == 0 {
            0.0
        } else {
            self.current_bytes as f64 / self.capacity_bytes as f64
        }
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks for a key without touching bookkeeping.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the cache's eviction policy.
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::size::NODE_OVERHEAD;
    use std::thread::sleep;
    use std::time::Duration;

    /// Builds a string value whose estimated size is exactly `bytes`.
    fn value_of_size(bytes: u64) -> String {
        "x".repeat((bytes - NODE_OVERHEAD) as usize)
    }

    #[test]
    fn test_store_new() {
        let store: BoundedCache<String> = BoundedCache::lru(1024);
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.current_size_bytes(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = BoundedCache::lru(1024);

        store.put("key1", "value1".to_string());
        let value = store.get("key1");

        assert_eq!(value, Some("value1".to_string()));
        assert_eq!(store.item_count(), 1);
        assert_eq!(store.current_size_bytes(), NODE_OVERHEAD + 6);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: BoundedCache<String> = BoundedCache::lru(1024);
        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite_replaces_size() {
        let mut store = BoundedCache::lru(1024);

        store.put("key1", value_of_size(100));
        store.put("key1", value_of_size(200));

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.current_size_bytes(), 200);
        assert_eq!(store.get("key1"), Some(value_of_size(200)));
    }

    #[test]
    fn test_store_remove() {
        let mut store = BoundedCache::lru(1024);

        store.put("key1", "value1".to_string());
        let removed = store.remove("key1");

        assert_eq!(removed, Some("value1".to_string()));
        assert!(store.is_empty());
        assert_eq!(store.current_size_bytes(), 0);
        assert_eq!(store.remove("key1"), None);
    }

    #[test]
    fn test_lru_eviction_prefers_oldest_access() {
        // Capacity for exactly three equal entries; touching A protects it,
        // so inserting D evicts B.
        let mut store = BoundedCache::lru(300);

        store.put("a", value_of_size(100));
        store.put("b", value_of_size(100));
        store.put("c", value_of_size(100));
        assert_eq!(store.current_size_bytes(), 300);

        sleep(Duration::from_millis(5));
        assert!(store.get("a").is_some());

        sleep(Duration::from_millis(5));
        store.put("d", value_of_size(100));

        assert_eq!(store.item_count(), 3);
        assert!(store.contains_key("a"));
        assert!(!store.contains_key("b"));
        assert!(store.contains_key("c"));
        assert!(store.contains_key("d"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_lfu_eviction_prefers_fewest_accesses() {
        let mut store = BoundedCache::lfu(300);

        store.put("a", value_of_size(100));
        store.put("b", value_of_size(100));
        store.put("c", value_of_size(100));

        // a and c gain accesses; b stays at zero
        assert!(store.get("a").is_some());
        assert!(store.get("c").is_some());

        store.put("d", value_of_size(100));

        assert!(store.contains_key("a"));
        assert!(!store.contains_key("b"));
        assert!(store.contains_key("c"));
        assert!(store.contains_key("d"));
    }

    #[test]
    fn test_lfu_ties_evict_oldest_insert_first() {
        let mut store = BoundedCache::lfu(200);

        store.put("first", value_of_size(100));
        sleep(Duration::from_millis(5));
        store.put("second", value_of_size(100));
        store.put("third", value_of_size(100));

        // All counts equal; the earliest insert loses
        assert!(!store.contains_key("first"));
        assert!(store.contains_key("second"));
        assert!(store.contains_key("third"));
    }

    #[test]
    fn test_eviction_runs_until_capacity_holds() {
        let mut store = BoundedCache::lru(250);

        store.put("a", value_of_size(100));
        store.put("b", value_of_size(100));

        // 240 bytes only fit alongside a single survivor after two evictions
        sleep(Duration::from_millis(5));
        store.put("big", value_of_size(240));

        assert_eq!(store.item_count(), 1);
        assert!(store.contains_key("big"));
        assert_eq!(store.current_size_bytes(), 240);
        assert_eq!(store.stats().evictions, 2);
    }

    #[test]
    fn test_oversized_entry_is_kept() {
        let mut store = BoundedCache::lru(100);

        store.put("small", value_of_size(80));
        store.put("huge", value_of_size(500));

        assert_eq!(store.item_count(), 1);
        assert!(store.contains_key("huge"));
        assert!(store.current_size_bytes() > store.capacity_bytes());

        // The next normal insert restores the capacity invariant
        store.put("normal", value_of_size(60));
        assert!(store.current_size_bytes() <= store.capacity_bytes());
        assert!(store.contains_key("normal"));
    }

    #[test]
    fn test_ttl_expiration_on_get() {
        let mut store = BoundedCache::ttl(1024, 1);

        store.put("x", "v".to_string());
        assert_eq!(store.get("x"), Some("v".to_string()));

        sleep(Duration::from_millis(1500));

        assert_eq!(store.get("x"), None);
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.current_size_bytes(), 0);
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_purge_expired() {
        let mut store = BoundedCache::ttl(1024, 1);

        store.put("gone", "a".to_string());
        let removed_early = store.purge_expired();
        assert_eq!(removed_early, 0);

        sleep(Duration::from_millis(1100));
        store.put("kept", "b".to_string());

        let removed = store.purge_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.item_count(), 1);
        assert!(store.contains_key("kept"));
    }

    #[test]
    fn test_purge_expired_noop_for_lru() {
        let mut store = BoundedCache::lru(1024);
        store.put("a", "v".to_string());

        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_items_does_not_touch_bookkeeping() {
        let mut store = BoundedCache::lfu(1024);
        store.put("a", "v".to_string());
        assert!(store.get("a").is_some());

        let counts: Vec<u64> = store.items().map(|(_, e)| e.access_count).collect();
        assert_eq!(counts, vec![1]);

        // A second snapshot still sees the same count
        let counts_again: Vec<u64> = store.items().map(|(_, e)| e.access_count).collect();
        assert_eq!(counts_again, vec![1]);
    }

    #[test]
    fn test_size_accounting_matches_entry_sum() {
        let mut store = BoundedCache::lru(10_000);

        store.put("a", value_of_size(100));
        store.put("b", value_of_size(250));
        store.put("c", value_of_size(75));
        store.remove("b");

        let sum: u64 = store.items().map(|(_, e)| e.size_bytes).sum();
        assert_eq!(store.current_size_bytes(), sum);
    }

    #[test]
    fn test_occupancy() {
        let mut store = BoundedCache::lru(200);
        store.put("a", value_of_size(100));

        assert!((store.occupancy() - 0.5).abs() < f64::EPSILON);

        let empty: BoundedCache<String> = BoundedCache::lru(0);
        assert_eq!(empty.occupancy(), 0.0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = BoundedCache::lru(1024);

        store.put("key1", "value1".to_string());
        assert!(store.get("key1").is_some()); // hit
        assert!(store.get("nonexistent").is_none()); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
