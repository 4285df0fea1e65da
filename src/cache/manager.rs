//! Item Cache Manager
//!
//! Sits between the request handlers and the record store. Reads go through
//! [`ItemCacheManager::get`], which serves a live entry or fetches, stores
//! and returns the item's representation. Writers call
//! [`ItemCacheManager::invalidate`] once their store mutation has succeeded.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{cache_key, CacheStats, CacheStore, CachedValue, Lookup};
use crate::config::Config;
use crate::error::CacheError;
use crate::store::RecordStore;

/// Read-through, write-invalidated cache of item representations.
///
/// The table lock is never held while the record store is being queried, so
/// a slow fetch for one item does not stall reads of other items. Two misses
/// on the same id may both fetch; whichever finishes last wins.
pub struct ItemCacheManager {
    store: Arc<dyn RecordStore>,
    table: RwLock<CacheStore>,
}

impl ItemCacheManager {
    pub fn new(store: Arc<dyn RecordStore>, max_entries: usize, ttl: Duration) -> Self {
        Self {
            store,
            table: RwLock::new(CacheStore::new(max_entries, ttl)),
        }
    }

    /// Creates a manager sized and timed from the configuration.
    pub fn from_config(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        Self::new(
            store,
            config.cache_max_entries,
            Duration::from_secs(config.cache_ttl),
        )
    }

    /// Returns the representation of item `id`.
    ///
    /// The caller is expected to have checked that the item exists. If the
    /// store fetch behind a miss fails, its error is returned as is and
    /// nothing is cached.
    pub async fn get(&self, id: u64) -> Result<CachedValue, CacheError> {
        let key = cache_key(id);
        debug!(id, "Checking cache for item");

        let lookup = self.table.write().await.lookup(&key);
        let ticket = match lookup {
            Lookup::Hit(value) => {
                info!(id, "Item retrieved from cache");
                return Ok(value);
            }
            Lookup::Miss(ticket) => ticket,
        };

        info!(id, "Item not found in cache, retrieving from record store");
        let record = self.store.get(id).await?;
        let value = record
            .to_representation()
            .map(Arc::new)
            .map_err(|source| CacheError::Serialization { id, source })?;

        let installed = self
            .table
            .write()
            .await
            .populate(key, Arc::clone(&value), ticket);
        if !installed {
            debug!(id, "Fetched item not cached; it was invalidated during the fetch");
        }

        Ok(value)
    }

    /// Drops the cached representation of item `id`, if any.
    pub async fn invalidate(&self, id: u64) {
        let removed = self.table.write().await.invalidate(&cache_key(id));
        debug!(id, removed, "Invalidated cached item");
    }

    /// Physically removes expired entries. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.table.write().await.purge_expired()
    }

    /// Whether item `id` currently has a live cache entry.
    pub async fn contains(&self, id: u64) -> bool {
        self.table.read().await.contains(&cache_key(id))
    }

    pub async fn stats(&self) -> CacheStats {
        self.table.read().await.stats()
    }
}
