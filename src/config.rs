//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{DEFAULT_MAX_ENTRIES, ITEM_CACHE_TTL};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of a cached item, in seconds
    pub cache_ttl: u64,
    /// Maximum number of cached items before LRU eviction
    pub cache_max_entries: usize,
    /// Background purge interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_TTL` - Item cache TTL in seconds (default: 900)
    /// - `CACHE_MAX_ENTRIES` - Item cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 60)
    ///
    /// Missing, unparseable or zero values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: var_or("SERVER_PORT", defaults.server_port),
            cache_ttl: var_or("CACHE_TTL", defaults.cache_ttl),
            cache_max_entries: var_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cleanup_interval: var_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            cache_ttl: ITEM_CACHE_TTL.as_secs(),
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            cleanup_interval: 60,
        }
    }
}

fn var_or<T>(name: &str, default: T) -> T
where
    T: FromStr + PartialEq + Default,
{
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v: &T| *v != T::default())
        .unwrap_or(default)
}
