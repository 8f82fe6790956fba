//! Memoizer Module
//!
//! Wraps an asynchronous producer with a bounded cache so that concurrent
//! requests for the same key share one in-flight computation and one cached
//! result.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::debug;

use crate::cache::SharedCache;
use crate::error::{CacheError, Result};

/// Outcome published to every waiter of one in-flight computation.
type FlightOutcome<V> = Option<Result<V>>;

// == Memoizer ==
/// Memoizes an async producer through a shared bounded cache.
///
/// The producer runs in its own task: a waiter abandoning its await does not
/// cancel the shared computation, which still populates the cache for other
/// waiters and future callers. Failures are propagated to every waiter of
/// that invocation and are never cached.
#[derive(Clone)]
pub struct Memoizer<V> {
    /// Result store consulted before any computation starts
    cache: SharedCache<V>,
    /// One watch channel per key currently being computed
    in_flight: Arc<Mutex<HashMap<String, watch::Receiver<FlightOutcome<V>>>>>,
}

impl<V> Memoizer<V>
where
    V: Clone + Serialize + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a new Memoizer over the given shared cache.
    pub fn new(cache: SharedCache<V>) -> Self {
        Self {
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the underlying shared cache.
    pub fn cache(&self) -> &SharedCache<V> {
        &self.cache
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, computing it once if absent.
    ///
    /// If a computation for the key is already in flight, this call joins it
    /// and receives the same result or the same failure instead of invoking
    /// the producer again. On success the value is stored in the cache
    /// before any waiter resumes.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, producer: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        if let Some(value) = self.cache.write().await.get(key) {
            return Ok(value);
        }

        let mut rx = {
            let mut flights = self.in_flight.lock().await;
            match flights.get(key) {
                Some(rx) => {
                    debug!(key, "joining in-flight computation");
                    rx.clone()
                }
                None => {
                    debug!(key, "starting computation");
                    let (tx, rx) = watch::channel(None);
                    flights.insert(key.to_string(), rx.clone());
                    self.spawn_flight(key.to_string(), producer(), tx);
                    rx
                }
            }
        };

        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return Err(CacheError::Internal(format!(
                    "computation for key '{key}' ended without a result"
                )));
            }
        }
    }

    /// Runs one producer invocation to completion in its own task.
    ///
    /// The in-flight marker is removed before the outcome is published, so a
    /// failed key is immediately eligible for re-computation.
    fn spawn_flight<Fut>(&self, key: String, fut: Fut, tx: watch::Sender<FlightOutcome<V>>)
    where
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            let outcome = match fut.await {
                Ok(value) => {
                    cache.write().await.put(key.clone(), value.clone());
                    Ok(value)
                }
                Err(err) => {
                    debug!(key = %key, error = %err, "producer failed");
                    Err(CacheError::producer(key.clone(), err))
                }
            };

            in_flight.lock().await.remove(&key);
            let _ = tx.send(Some(outcome));
        });
    }
}
