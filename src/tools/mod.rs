//! Tool Cache Module
//!
//! Helpers the AI tool handlers use to memoize idempotent reads such as
//! "list categories" or "search videos" for a short TTL, and to invalidate
//! them after a mutation.
//!
//! Handlers receive a `ToolCache` by injection; nothing here is global.

mod memo;

pub use memo::ToolCache;

use std::fmt::Display;

use tracing::debug;

use crate::cache::TtlCache;

// == Keys ==
/// Builds a composite cache key: `namespace:param1:param2...`.
///
/// `tool_key("categories", [10])` gives `"categories:10"`.
pub fn tool_key<I>(namespace: &str, params: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut key = namespace.to_string();
    for param in params {
        key.push(':');
        key.push_str(&param.to_string());
    }
    key
}

// == Invalidation ==
/// Deletes every key starting with `prefix`; returns how many were removed.
///
/// Works from a `keys()` snapshot, so keys inserted concurrently after the
/// snapshot survive.
pub fn invalidate_prefix<V>(cache: &TtlCache<V>, prefix: &str) -> usize {
    let removed = cache
        .keys()
        .iter()
        .filter(|key| key.starts_with(prefix))
        .filter(|key| cache.delete(key))
        .count();

    debug!(prefix = %prefix, removed, "invalidated cache prefix");
    removed
}
