//! Insertion Order Module
//!
//! Tracks insertion order for oldest-first eviction.

use std::collections::BTreeMap;

// == Insertion Order ==
/// Eviction queue keyed by insertion sequence number.
///
/// The lowest sequence number is the oldest insertion and the next eviction
/// candidate. Re-inserting a key under a fresh, higher sequence number moves
/// it to the back of the queue.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: BTreeMap<u64, String>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Records `key` as inserted at `seq`.
    pub fn push(&mut self, seq: u64, key: &str) {
        self.order.insert(seq, key.to_string());
    }

    // == Remove ==
    /// Forgets the insertion recorded at `seq`.
    pub fn remove(&mut self, seq: u64) -> Option<String> {
        self.order.remove(&seq)
    }

    // == Pop Oldest ==
    /// Removes and returns the oldest-inserted key.
    ///
    /// Returns None if the queue is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Oldest ==
    /// Returns the oldest-inserted key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    // == Iterate ==
    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.values().map(String::as_str)
    }

    // == Length ==
    /// Returns the number of queued keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Clear ==
    /// Forgets every queued key.
    pub fn clear(&mut self) {
        self.order.clear();
    }
}
