//! Background Tasks Module
//!
//! Contains background tasks that run periodically during process operation.
//!
//! # Tasks
//! - Expiry Sweep: Purges expired entries across all registered caches

mod sweep;

pub use sweep::spawn_sweep_task;
