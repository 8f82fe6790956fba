//! Eviction Policy Module
//!
//! Implements the pluggable victim-selection strategies for size-bounded
//! caches: least-recently-used, least-frequently-used and time-to-live.

use crate::cache::CacheEntry;

// == Eviction Policy ==
/// Strategy deciding which entry to remove when a cache exceeds its capacity.
///
/// All variants select deterministically: ties fall back to bookkeeping
/// timestamps and finally the insertion sequence, so equal inputs always
/// produce the same victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Evicts the entry with the oldest last access; ties broken by
    /// earliest insertion order.
    Lru,
    /// Evicts the entry with the lowest access count; ties broken by oldest
    /// creation time, then earliest insertion order.
    Lfu,
    /// Entries expire `ttl_seconds` after insertion. Capacity pressure with
    /// no expired entry falls back to oldest creation time.
    Ttl { ttl_seconds: u64 },
}

impl EvictionPolicy {
    // == On Insert ==
    /// Applies insert-time bookkeeping to a freshly created entry.
    pub fn on_insert<V>(&self, entry: &mut CacheEntry<V>, now_ms: u64) {
        if let EvictionPolicy::Ttl { ttl_seconds } = self {
            entry.expires_at = Some(now_ms + ttl_seconds * 1000);
        }
    }

    // == On Access ==
    /// Applies read-time bookkeeping to an entry that was hit.
    ///
    /// Recency and frequency are both updated on every hit; each variant
    /// consults only the field it selects victims by.
    pub fn on_access<V>(&self, entry: &mut CacheEntry<V>, now_ms: u64) {
        entry.last_accessed_at = now_ms;
        entry.access_count += 1;
    }

    // == Is Expired ==
    /// Checks whether an entry is logically absent at the given timestamp.
    ///
    /// Only the TTL variant expires entries; the others always return false.
    pub fn is_expired<V>(&self, entry: &CacheEntry<V>, now_ms: u64) -> bool {
        match self {
            EvictionPolicy::Ttl { .. } => entry.is_expired_at(now_ms),
            _ => false,
        }
    }

    // == Select Victim ==
    /// Returns the key of the entry to evict next, or None if no candidate
    /// exists.
    pub fn select_victim<'a, V: 'a, I>(&self, entries: I, now_ms: u64) -> Option<String>
    where
        I: Iterator<Item = (&'a String, &'a CacheEntry<V>)>,
    {
        match self {
            EvictionPolicy::Lru => entries
                .min_by_key(|(_, e)| (e.last_accessed_at, e.seq))
                .map(|(k, _)| k.clone()),
            EvictionPolicy::Lfu => entries
                .min_by_key(|(_, e)| (e.access_count, e.created_at, e.seq))
                .map(|(k, _)| k.clone()),
            EvictionPolicy::Ttl { .. } => {
                let candidates: Vec<_> = entries.collect();

                // Expired entries go first; size pressure falls back to the
                // oldest entry so it is never left unresolved.
                if let Some((key, _)) = candidates
                    .iter()
                    .filter(|(_, e)| e.is_expired_at(now_ms))
                    .min_by_key(|(_, e)| (e.expires_at, e.seq))
                {
                    return Some((*key).clone());
                }

                candidates
                    .iter()
                    .min_by_key(|(_, e)| (e.created_at, e.seq))
                    .map(|(k, _)| (*k).clone())
            }
        }
    }
}
