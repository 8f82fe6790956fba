//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with access bookkeeping
//! and optional TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// Entries are owned exclusively by the cache that holds them. Bookkeeping
/// fields are updated on every read; a new entry replaces the old one on write.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Estimated in-memory size of the value in bytes
    pub size_bytes: u64,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Last access timestamp (Unix milliseconds)
    pub last_accessed_at: u64,
    /// Number of reads that hit this entry
    pub access_count: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
    /// Monotonic insertion sequence, used for deterministic tie-breaking
    pub seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry at the given timestamp.
    ///
    /// Expiration is left unset; the eviction policy assigns it on insert
    /// when the cache is TTL-bounded.
    pub fn new(value: V, size_bytes: u64, now_ms: u64, seq: u64) -> Self {
        Self {
            value,
            size_bytes,
            created_at: now_ms,
            last_accessed_at: now_ms,
            access_count: 0,
            expires_at: None,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at the given timestamp.
    ///
    /// Boundary condition: an entry is considered expired once the current
    /// time is greater than or equal to the expiration time.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// Returns `Some(0)` once the entry has expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.expires_at.map(|expires| expires.saturating_sub(now_ms))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let now = current_timestamp_ms();
        let entry = CacheEntry::new("value".to_string(), 40, now, 0);

        assert_eq!(entry.value, "value");
        assert_eq!(entry.size_bytes, 40);
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.last_accessed_at, now);
        assert_eq!(entry.access_count, 0);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired_at(now + 1_000_000));
    }

    #[test]
    fn test_entry_expiration() {
        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new(1u32, 8, now, 0);
        entry.expires_at = Some(now + 1_000);

        assert!(!entry.is_expired_at(now));
        assert!(!entry.is_expired_at(now + 999));
        assert!(entry.is_expired_at(now + 1_500));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new(1u32, 8, now, 0);
        entry.expires_at = Some(now);

        // Expired when current time >= expires_at
        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new(1u32, 8, now, 0);
        entry.expires_at = Some(now + 10_000);

        assert_eq!(entry.ttl_remaining_ms(now), Some(10_000));
        assert_eq!(entry.ttl_remaining_ms(now + 4_000), Some(6_000));
    }

    #[test]
    fn test_ttl_remaining_no_expiration() {
        let now = current_timestamp_ms();
        let entry = CacheEntry::new(1u32, 8, now, 0);

        assert!(entry.ttl_remaining_ms(now).is_none());
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new(1u32, 8, now, 0);
        entry.expires_at = Some(now + 1_000);

        // TTL remaining clamps to 0 once expired
        assert_eq!(entry.ttl_remaining_ms(now + 5_000), Some(0));
    }
}
