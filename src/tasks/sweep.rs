//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{lock, CacheStore};

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task sleeps for `interval` between passes and holds only a weak
/// reference to the store, so it ends by itself once the owning cache is
/// gone. `TtlCache::destroy` aborts it through the returned handle.
///
/// Must be called from within a tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::<String>::new(1000, Duration::from_secs(60))));
/// let sweep = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(60));
/// // Later, on teardown:
/// sweep.abort();
/// ```
pub fn spawn_sweep_task<V>(store: Weak<Mutex<CacheStore<V>>>, interval: Duration) -> JoinHandle<()>
where
    V: Send + 'static,
{
    tokio::spawn(async move {
        debug!(
            interval_ms = interval.as_millis() as u64,
            "starting TTL sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(store) = store.upgrade() else {
                debug!("cache dropped, TTL sweep task exiting");
                break;
            };

            let removed = lock(&store).purge_expired();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn shared_store(ttl: Duration) -> Arc<Mutex<CacheStore<String>>> {
        Arc::new(Mutex::new(CacheStore::new(100, ttl)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_expired_entries() {
        let store = shared_store(Duration::from_secs(300));
        lock(&store).set(
            "expire_soon".to_string(),
            "value".to_string(),
            Some(Duration::from_secs(1)),
        );

        let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Removed without any access from the caller
        assert_eq!(lock(&store).len(), 0);
        assert_eq!(lock(&store).stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_preserves_valid_entries() {
        let store = shared_store(Duration::from_secs(3600));
        lock(&store).set("long_lived".to_string(), "value".to_string(), None);

        let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(
            lock(&store).get("long_lived").map(String::as_str),
            Some("value")
        );

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_exits_when_store_dropped() {
        let store = shared_store(Duration::from_secs(60));
        let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_millis(100));

        drop(store);
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(handle.is_finished(), "sweep should stop once the store is gone");
    }

    #[tokio::test]
    async fn test_sweep_can_be_aborted() {
        let store = shared_store(Duration::from_secs(60));
        let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
