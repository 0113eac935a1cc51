//! TTL Cache Module
//!
//! The shareable cache handle: wraps a `CacheStore` behind a mutex and owns
//! the background sweep task for its whole lifetime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// Every store operation completes its bookkeeping before returning, so a
/// poisoned store is still consistent.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// == TTL Cache ==
/// Bounded in-process cache with per-entry expiry and a background sweep.
///
/// Every method is a short synchronous critical section on the inner store,
/// so operations never interleave with each other or with a sweep tick.
/// Share an instance by wrapping it in an `Arc`; the cache is destroyed (sweep
/// cancelled, entries dropped) on `destroy()` or when the last owner drops it.
///
/// # Example
/// ```ignore
/// let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(1), 10, Duration::from_secs(60))?;
/// cache.set("key1", "value1".to_string());
/// assert_eq!(cache.get("key1").as_deref(), Some("value1"));
/// cache.destroy();
/// ```
pub struct TtlCache<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    sweep: Mutex<Option<JoinHandle<()>>>,
    destroyed: AtomicBool,
    sweep_interval: Duration,
}

impl<V: Send + 'static> TtlCache<V> {
    // == Constructors ==
    /// Creates a cache and starts its sweep on the current tokio runtime.
    ///
    /// # Errors
    /// - `InvalidConfiguration` if any argument is zero
    /// - `Runtime` if called outside a tokio runtime
    pub fn new(ttl: Duration, max_size: usize, sweep_interval: Duration) -> Result<Self> {
        Self::from_config(&CacheConfig {
            ttl,
            max_size,
            sweep_interval,
        })
    }

    /// 60 second TTL, 1000 entries, 60 second sweep.
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(&CacheConfig::default())
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Handle::try_current().map_err(|e| CacheError::Runtime(e.to_string()))?;

        let store = Arc::new(Mutex::new(CacheStore::new(config.max_size, config.ttl)));
        let sweep = spawn_sweep_task(Arc::downgrade(&store), config.sweep_interval);

        debug!(
            ttl_ms = config.ttl.as_millis() as u64,
            max_size = config.max_size,
            sweep_interval_ms = config.sweep_interval.as_millis() as u64,
            "cache created"
        );

        Ok(Self {
            store,
            sweep: Mutex::new(Some(sweep)),
            destroyed: AtomicBool::new(false),
            sweep_interval: config.sweep_interval,
        })
    }
}

impl<V: Clone> TtlCache<V> {
    // == Get ==
    /// Returns a clone of the live value for `key`, or None when absent or
    /// expired. An expired entry is removed as a side effect.
    pub fn get(&self, key: &str) -> Option<V> {
        lock(&self.store).get(key).cloned()
    }
}

impl<V> TtlCache<V> {
    // == Set ==
    /// Stores `value` under `key` with the default TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.insert(key.into(), value, None);
    }

    /// Stores `value` under `key`, expiring after `ttl` instead of the default.
    ///
    /// A zero `ttl` removes any existing entry and stores nothing. TTLs longer
    /// than `MAX_TTL` (including `Duration::MAX`) are clamped to it.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.insert(key.into(), value, Some(ttl));
    }

    fn insert(&self, key: String, value: V, ttl: Option<Duration>) {
        let mut store = lock(&self.store);
        // Checked under the store lock so a concurrent destroy cannot be undone
        if self.is_destroyed() {
            warn!(key = %key, "set on a destroyed cache ignored");
            return;
        }
        store.set(key, value, ttl);
    }

    /// True if `key` holds a live entry. Removes the entry if it has expired.
    pub fn has(&self, key: &str) -> bool {
        lock(&self.store).has(key)
    }

    /// Removes `key`; returns whether it was present. Absent keys are a no-op.
    pub fn delete(&self, key: &str) -> bool {
        lock(&self.store).delete(key)
    }

    /// Removes every entry in one critical section and returns how many were
    /// removed. The sweep keeps running.
    pub fn clear(&self) -> usize {
        lock(&self.store).clear()
    }

    /// Number of stored entries.
    ///
    /// Counts expired entries that have not yet been removed by an access or
    /// by the sweep.
    pub fn len(&self) -> usize {
        lock(&self.store).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the stored keys, oldest insertion first. Like `len`, it may
    /// include expired keys not yet removed.
    pub fn keys(&self) -> Vec<String> {
        lock(&self.store).keys()
    }

    /// Remaining lifetime of a live entry.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        lock(&self.store).ttl_remaining(key)
    }

    /// Runs one sweep pass immediately; returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        lock(&self.store).purge_expired()
    }

    pub fn stats(&self) -> CacheStats {
        lock(&self.store).stats()
    }

    pub fn max_size(&self) -> usize {
        lock(&self.store).max_size()
    }

    pub fn default_ttl(&self) -> Duration {
        lock(&self.store).default_ttl()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// True while the background sweep task is scheduled.
    pub fn is_sweeping(&self) -> bool {
        lock(&self.sweep)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Destroy ==
    /// Cancels the sweep and drops every entry. Idempotent.
    ///
    /// The instance is terminal afterwards: `set` is ignored and the sweep is
    /// never restarted.
    pub fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(handle) = lock(&self.sweep).take() {
            handle.abort();
        }
        lock(&self.store).clear();

        debug!("cache destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl<V> Drop for TtlCache<V> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("len", &self.len())
            .field("sweep_interval", &self.sweep_interval)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
