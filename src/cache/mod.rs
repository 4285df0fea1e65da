//! Cache Module
//!
//! Read-through, write-invalidated cache for single-item retrieval.

mod entry;
mod lru;
mod manager;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use entry::{CacheEntry, CachedValue};
pub use lru::LruTracker;
pub use manager::ItemCacheManager;
pub use stats::CacheStats;
pub use store::{CacheStore, FetchTicket, Lookup};

// == Public Constants ==
/// How long a cached item representation is served.
pub const ITEM_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Default bound on the number of cached items.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Namespace shared by every item cache key.
pub const CACHE_KEY_PREFIX: &str = "inventory_item_";

/// Cache key for the item with the given id.
pub fn cache_key(id: u64) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, id)
}
