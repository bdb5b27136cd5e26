//! Memoization Module
//!
//! Shared cache handle and the `Memoized` combinator that wraps async
//! functions so repeated calls with equal arguments reuse the stored result.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as SyncMutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{CacheInfo, CacheKey, CacheStats, CacheStore, CanonicalJsonKey, KeyStrategy};
use crate::error::{AppError, Result};

/// Confirmation returned by [`Cache::clear`].
pub const CLEAR_MESSAGE: &str = "Cache cleared successfully!";

type InFlight = Arc<SyncMutex<HashMap<CacheKey, Arc<Mutex<()>>>>>;

/// A caller's claim on one key's lock.
///
/// Dropping the claim, including when the calling future is cancelled,
/// removes the table entry once no other caller holds or waits on it.
struct InFlightClaim {
    table: InFlight,
    key: CacheKey,
    lock: Arc<Mutex<()>>,
}

impl InFlightClaim {
    fn new(table: &InFlight, key: CacheKey) -> Self {
        let lock = table
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(key.clone())
            .or_default()
            .clone();
        Self {
            table: table.clone(),
            key,
            lock,
        }
    }
}

impl Drop for InFlightClaim {
    fn drop(&mut self) {
        let mut table = self
            .table
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if table
            .get(&self.key)
            // Only the table and this claim still point at the lock
            .is_some_and(|lock| Arc::strong_count(lock) == 2)
        {
            table.remove(&self.key);
        }
    }
}

// == Cache Handle ==
/// Cloneable handle to one cache store.
///
/// Created once at startup and passed to whichever layer needs it. Clones
/// share the same store.
///
/// Concurrent calls with the same key are serialized through a per-key lock,
/// so only one of them runs the wrapped function and the rest observe its
/// stored result. Calls with different keys never wait on each other.
#[derive(Clone, Default)]
pub struct Cache {
    store: Arc<RwLock<CacheStore>>,
    in_flight: InFlight,
}

impl Cache {
    /// Creates a handle around a fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Wrapping ==
    /// Wraps `func` with the default canonical-JSON key strategy.
    pub fn cache_result<F>(&self, name: &'static str, func: F) -> Memoized<F> {
        self.memoize_with(name, func, CanonicalJsonKey)
    }

    /// Wraps `func` with a custom key strategy.
    pub fn memoize_with<F, K>(&self, name: &'static str, func: F, keys: K) -> Memoized<F, K> {
        Memoized {
            name,
            func,
            keys,
            cache: self.clone(),
        }
    }

    // == Direct Use ==
    /// Returns the stored result for `function(args)`, computing it on a miss.
    pub async fn get_or_compute<A, R, Fut>(
        &self,
        function: &str,
        args: &A,
        compute: impl FnOnce() -> Fut,
    ) -> Result<R>
    where
        A: Serialize + ?Sized,
        R: Serialize + DeserializeOwned,
        Fut: Future<Output = Result<R>>,
    {
        let key = CanonicalJsonKey.derive(function, args)?;
        self.get_or_compute_key(key, compute).await
    }

    /// Returns the stored result under `key`, computing it on a miss.
    ///
    /// Failures are returned to the caller and never stored.
    pub async fn get_or_compute_key<R, Fut>(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> Fut,
    ) -> Result<R>
    where
        R: Serialize + DeserializeOwned,
        Fut: Future<Output = Result<R>>,
    {
        let claim = InFlightClaim::new(&self.in_flight, key.clone());
        let _guard = claim.lock.lock().await;
        self.lookup_or_compute(&key, compute).await
    }

    async fn lookup_or_compute<R, Fut>(
        &self,
        key: &CacheKey,
        compute: impl FnOnce() -> Fut,
    ) -> Result<R>
    where
        R: Serialize + DeserializeOwned,
        Fut: Future<Output = Result<R>>,
    {
        let cached = self.store.write().await.get(key);
        if let Some(value) = cached {
            debug!("Cache hit: {}", key);
            return serde_json::from_value(value).map_err(|e| {
                AppError::Internal(format!("Cached value for {} has wrong type: {}", key, e))
            });
        }

        debug!("Cache miss: {}", key);
        let result = compute().await?;

        match serde_json::to_value(&result) {
            Ok(value) => self.store.write().await.insert(key.clone(), value),
            Err(e) => warn!("Result for {} not cached, serialization failed: {}", key, e),
        }

        Ok(result)
    }

    // == Introspection ==
    /// Empties the store and returns a confirmation message.
    pub async fn clear(&self) -> String {
        let removed = self.store.write().await.clear();
        info!("Cache cleared, {} entries removed", removed);
        CLEAR_MESSAGE.to_string()
    }

    /// Returns a human-readable summary of entry, hit and miss counts.
    pub async fn stats_summary(&self) -> String {
        self.stats().await.to_string()
    }

    /// Returns the raw counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Returns per-entry diagnostics.
    pub async fn info(&self) -> CacheInfo {
        self.store.read().await.info()
    }

    /// Number of per-key locks currently alive.
    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

// == Memoized ==
/// An async function wrapped by a [`Cache`].
///
/// Calling it has the same contract as calling the function directly.
pub struct Memoized<F, K = CanonicalJsonKey> {
    name: &'static str,
    func: F,
    keys: K,
    cache: Cache,
}

impl<F, K> Memoized<F, K> {
    /// Calls the wrapped function through the cache.
    pub async fn call<A, R, Fut>(&self, args: A) -> Result<R>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<R>>,
        K: KeyStrategy<A>,
        R: Serialize + DeserializeOwned,
    {
        let key = self.keys.derive(self.name, &args)?;
        self.cache
            .get_or_compute_key(key, || (self.func)(args))
            .await
    }
}
