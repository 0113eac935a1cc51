//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

/// Longest lifetime an entry can get (about 100 years). Longer TTLs, up to
/// `Duration::MAX`, are clamped to this so "never expire" cannot overflow.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A single cached value with its absolute expiry and queue position.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, opaque to the cache
    pub value: V,
    /// Instant at and after which the entry is gone
    pub expires_at: Instant,
    /// Insertion sequence number (position in the eviction queue)
    pub seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` after `now`, with `ttl` clamped to `MAX_TTL`.
    pub fn new(value: V, ttl: Duration, now: Instant, seq: u64) -> Self {
        // MAX_TTL past any live Instant stays in range on every platform
        let expires_at = now + ttl.min(MAX_TTL);

        Self {
            value,
            expires_at,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired when `now >= expires_at`, so
    /// an entry read at exactly its expiry instant is already gone.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
