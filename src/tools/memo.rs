//! Memoizing wrapper handed to tool handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::invalidate_prefix;
use crate::cache::TtlCache;

// == Tool Cache ==
/// Cloneable handle over a shared `TtlCache` for tool handlers.
///
/// Not single-flight: two handlers missing on the same key at the same time
/// both run their loader, and the later write wins.
pub struct ToolCache<V> {
    cache: Arc<TtlCache<V>>,
}

impl<V> Clone for ToolCache<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<V> ToolCache<V> {
    pub fn new(cache: Arc<TtlCache<V>>) -> Self {
        Self { cache }
    }

    /// The underlying shared cache.
    pub fn cache(&self) -> &Arc<TtlCache<V>> {
        &self.cache
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        self.cache.set(key, value);
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.cache.set_with_ttl(key, value, ttl);
    }

    /// Drops every cached result under `prefix`, e.g. `"categories:"` after
    /// a category is created.
    pub fn invalidate(&self, prefix: &str) -> usize {
        invalidate_prefix(&self.cache, prefix)
    }
}

impl<V: Clone> ToolCache<V> {
    pub fn get(&self, key: &str) -> Option<V> {
        self.cache.get(key)
    }

    /// Returns the cached value for `key`, or runs `loader` and caches its
    /// `Ok` result. Errors are passed through and never cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.cache.get(key) {
            debug!(key = %key, "tool cache hit");
            return Ok(value);
        }

        debug!(key = %key, "tool cache miss");
        let value = loader().await?;
        self.cache.set(key, value.clone());
        Ok(value)
    }

    /// Infallible variant of `get_or_try_insert_with`.
    pub async fn get_or_insert_with<F, Fut>(&self, key: &str, loader: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.cache.get(key) {
            debug!(key = %key, "tool cache hit");
            return value;
        }

        debug!(key = %key, "tool cache miss");
        let value = loader().await;
        self.cache.set(key, value.clone());
        value
    }
}
