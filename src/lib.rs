//! Memocache - A size-bounded async memoization cache layer
//!
//! Provides byte-budgeted caches with LRU, LFU and TTL eviction, async
//! memoization with in-flight deduplication, and a process-wide registry
//! with an HTTP reporting surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedCache, CacheRegistry, EvictionPolicy, Memoizer, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
