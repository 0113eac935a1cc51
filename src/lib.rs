//! LearnBase Cache - bounded TTL cache for the AI tool layer
//!
//! Provides an in-process cache with per-entry expiration, oldest-insertion
//! eviction and a background sweep, plus the memoization helpers tool
//! handlers use and an admin HTTP surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod tools;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::{CacheConfig, Config};
pub use error::{CacheError, Result};
pub use tools::{tool_key, ToolCache};
