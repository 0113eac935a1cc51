//! Cache Store Module
//!
//! Synchronous cache engine combining HashMap storage with insertion-order
//! eviction and TTL expiration. Not shared by itself; `TtlCache` wraps it.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == Cache Store ==
/// Bounded key-value storage with per-entry expiry.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Eviction queue, oldest insertion first
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL applied when `set` gets no override
    default_ttl: Duration,
    /// Next insertion sequence number
    next_seq: u64,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new store with the given capacity and default TTL.
    ///
    /// A `max_size` of zero yields a store that never retains anything.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_size,
            default_ttl,
            next_seq: 0,
        }
    }

    // == Set ==
    /// Inserts or overwrites `key`.
    ///
    /// An overwrite resets the expiry and counts as a fresh insertion, so the
    /// key moves to the back of the eviction queue. Inserting into a full
    /// store evicts the oldest insertion first. A zero `ttl` means "do not
    /// cache": the key is removed and nothing is stored.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);

        // Overwrite is remove + re-insert
        self.remove_entry(&key);

        if ttl.is_zero() || self.max_size == 0 {
            return;
        }

        while self.entries.len() >= self.max_size {
            let Some(evicted) = self.order.pop_oldest() else {
                break;
            };
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!(key = %evicted, "evicted oldest cache entry");
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        // Entry first: nothing below can fail, so map and queue stay paired
        let entry = CacheEntry::new(value, ttl, Instant::now(), seq);
        self.order.push(seq, &key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if self.remove_if_expired(key, Instant::now()) {
            self.stats.record_miss();
            return None;
        }

        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(&entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// Same presence and expiry rules as `get`, without touching hit/miss counters.
    pub fn has(&mut self, key: &str) -> bool {
        !self.remove_if_expired(key, Instant::now()) && self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes `key`, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes every entry, returning how many were removed.
    ///
    /// Counters other than `total_entries` are kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
        removed
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Keys ==
    /// Current keys, oldest insertion first. May include expired entries
    /// that have not been removed yet, consistent with `len`.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().map(str::to_string).collect()
    }

    // == Time To Live ==
    /// Remaining lifetime of a live entry.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(CacheEntry::ttl_remaining)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Raw number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Limits ==
    /// Capacity the store evicts down to.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// TTL used when `set` gets no override.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Internal Helpers ==
    /// Removes `key` if it has expired as of `now`; returns whether it did.
    fn remove_if_expired(&mut self, key: &str, now: Instant) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now));

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
        }
        expired
    }

    /// Removes `key` from both the map and the eviction queue.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(entry.seq);
        self.stats.set_total_entries(self.entries.len());
        Some(entry)
    }
}
