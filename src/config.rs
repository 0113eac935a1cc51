//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default entry time-to-live in milliseconds.
pub const DEFAULT_TTL_MS: u64 = 60_000;
/// Default maximum number of live entries.
pub const DEFAULT_MAX_SIZE: usize = 1000;
/// Default period of the background expiration sweep in milliseconds.
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 60_000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in milliseconds applied at `set` time
    pub ttl_ms: u64,
    /// Hard cap on the number of entries
    pub max_size: usize,
    /// Background sweep interval in milliseconds
    pub sweep_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Default TTL (default: 60000)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep period (default: 60000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            ttl_ms: parse_env("CACHE_TTL_MS").unwrap_or(DEFAULT_TTL_MS),
            max_size: parse_env("CACHE_MAX_SIZE").unwrap_or(DEFAULT_MAX_SIZE),
            sweep_interval_ms: parse_env("CACHE_SWEEP_INTERVAL_MS")
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_MS),
            server_port: parse_env("SERVER_PORT").unwrap_or(3000),
        }
    }

    /// Returns the cache portion of the configuration.
    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_millis(self.ttl_ms),
            max_size: self.max_size,
            sweep_interval: Duration::from_millis(self.sweep_interval_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            max_size: DEFAULT_MAX_SIZE,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            server_port: 3000,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

// == Cache Config ==
/// Construction parameters for a `TtlCache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_size: usize,
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Rejects any value that would leave the cache non-functional.
    pub fn validate(&self) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "ttl must be greater than zero".to_string(),
            ));
        }
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfiguration(
                "max_size must be greater than zero".to_string(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "sweep_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Config::default().cache()
    }
}
