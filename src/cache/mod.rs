//! Cache Module
//!
//! Bounded in-memory caching with TTL expiration and oldest-insertion eviction.

mod entry;
mod order;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::{CacheEntry, MAX_TTL};
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl_cache::TtlCache;

pub(crate) use ttl_cache::lock;

// == Public Constants ==
/// Maximum allowed key length in bytes on the HTTP surface
pub const MAX_KEY_LENGTH: usize = 256;
