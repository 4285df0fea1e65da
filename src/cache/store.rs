//! Cache Store Module
//!
//! The synchronous entry table behind the item cache: a `HashMap` of entries
//! with TTL expiry, LRU capacity eviction and invalidation tombstones.
//! [`ItemCacheManager`](super::ItemCacheManager) wraps it in a lock and adds
//! the read-through fetch.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, CachedValue, LruTracker};

// == Lookup ==
/// Outcome of [`CacheStore::lookup`].
#[derive(Debug)]
pub enum Lookup {
    /// A live entry was found
    Hit(CachedValue),
    /// Nothing live; the caller should fetch and then call
    /// [`CacheStore::populate`] with this ticket
    Miss(FetchTicket),
}

/// Proof of when a miss started, checked again when its fetch completes.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    generation: u64,
    started_at: Instant,
}

/// Marks a key as invalidated at a given generation.
#[derive(Debug, Clone, Copy)]
struct Tombstone {
    generation: u64,
    recorded_at: Instant,
}

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    /// Last invalidation per key, kept for one TTL
    tombstones: HashMap<String, Tombstone>,
    /// Bumped by every invalidation
    generation: u64,
    max_entries: usize,
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` entries, each
    /// living for `ttl`.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            tombstones: HashMap::new(),
            generation: 0,
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    // == Lookup ==
    /// Returns the live entry for `key`, or a ticket for fetching it.
    ///
    /// An expired entry found here is dropped and the lookup counts as a miss.
    pub fn lookup(&mut self, key: &str) -> Lookup {
        let now = Instant::now();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let value = entry.value.clone();
                self.lru.touch(key);
                self.stats.hits += 1;
                return Lookup::Hit(value);
            }
            Some(_) => {
                self.remove_entry(key);
                self.stats.expirations += 1;
            }
            None => {}
        }

        self.stats.misses += 1;
        Lookup::Miss(FetchTicket {
            generation: self.generation,
            started_at: now,
        })
    }

    // == Populate ==
    /// Installs a freshly fetched value under `key` with a full TTL.
    ///
    /// The value is dropped, and `false` returned, when the key was
    /// invalidated after the ticket was issued or when the fetch itself took
    /// longer than one TTL.
    pub fn populate(&mut self, key: String, value: CachedValue, ticket: FetchTicket) -> bool {
        let overtaken = self
            .tombstones
            .get(&key)
            .is_some_and(|tombstone| tombstone.generation > ticket.generation);
        if overtaken || ticket.started_at.elapsed() >= self.ttl {
            self.stats.discarded += 1;
            return false;
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(victim) = self.lru.evict_oldest() {
                self.entries.remove(&victim);
                self.stats.evictions += 1;
            }
        }

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, self.ttl));
        self.stats.populates += 1;
        true
    }

    // == Invalidate ==
    /// Removes the entry for `key` and fences off fetches already in flight.
    ///
    /// Returns whether an entry was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.generation += 1;
        self.tombstones.insert(
            key.to_string(),
            Tombstone {
                generation: self.generation,
                recorded_at: Instant::now(),
            },
        );
        self.stats.invalidations += 1;
        self.remove_entry(key)
    }

    // == Purge Expired ==
    /// Removes every expired entry and every tombstone older than one TTL.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }
        self.stats.expirations += expired.len() as u64;

        let ttl = self.ttl;
        self.tombstones
            .retain(|_, tombstone| now.duration_since(tombstone.recorded_at) < ttl);

        expired.len()
    }

    /// Whether `key` currently has a live entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(900);

    fn value(n: u64) -> CachedValue {
        Arc::new(json!({ "id": n }))
    }

    fn ticket(store: &mut CacheStore, key: &str) -> FetchTicket {
        match store.lookup(key) {
            Lookup::Miss(ticket) => ticket,
            Lookup::Hit(_) => panic!("expected a miss for {key}"),
        }
    }

    fn fill(store: &mut CacheStore, key: &str, n: u64) {
        let t = ticket(store, key);
        assert!(store.populate(key.to_string(), value(n), t));
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let mut store = CacheStore::new(100, TTL);

        fill(&mut store, "k", 1);
        match store.lookup("k") {
            Lookup::Hit(v) => assert_eq!(*v, json!({ "id": 1 })),
            Lookup::Miss(_) => panic!("expected a hit"),
        }

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.populates, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let mut store = CacheStore::new(100, TTL);
        fill(&mut store, "k", 1);

        assert!(store.invalidate("k"));
        assert!(!store.contains("k"));
        assert!(!store.invalidate("k"), "second invalidation is a no-op");
        assert_eq!(store.stats().invalidations, 2);
    }

    #[tokio::test]
    async fn test_populate_overtaken_by_invalidation_is_discarded() {
        let mut store = CacheStore::new(100, TTL);

        let stale = ticket(&mut store, "k");
        store.invalidate("k");
        assert!(!store.populate("k".to_string(), value(1), stale));
        assert!(store.is_empty());

        // A miss that starts after the invalidation populates normally.
        fill(&mut store, "k", 2);
        assert!(store.contains("k"));
        assert_eq!(store.stats().discarded, 1);
    }

    #[tokio::test]
    async fn test_invalidating_other_key_does_not_discard() {
        let mut store = CacheStore::new(100, TTL);

        let t = ticket(&mut store, "a");
        store.invalidate("b");
        assert!(store.populate("a".to_string(), value(1), t));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_counts_as_miss() {
        let mut store = CacheStore::new(100, TTL);
        fill(&mut store, "k", 1);

        tokio::time::advance(TTL).await;
        assert!(matches!(store.lookup("k"), Lookup::Miss(_)));

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_slower_than_ttl_is_discarded() {
        let mut store = CacheStore::new(100, TTL);

        let t = ticket(&mut store, "k");
        tokio::time::advance(TTL).await;
        assert!(!store.populate("k".to_string(), value(1), t));
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let mut store = CacheStore::new(100, TTL);
        fill(&mut store, "old", 1);
        store.invalidate("gone");

        tokio::time::advance(Duration::from_secs(600)).await;
        fill(&mut store, "new", 2);

        tokio::time::advance(Duration::from_secs(300)).await;
        assert_eq!(store.purge_expired(), 1);
        assert!(store.contains("new"));
        assert!(store.tombstones.is_empty());
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let mut store = CacheStore::new(3, TTL);
        fill(&mut store, "k1", 1);
        fill(&mut store, "k2", 2);
        fill(&mut store, "k3", 3);

        // Touch k1 so k2 becomes the eviction candidate.
        assert!(matches!(store.lookup("k1"), Lookup::Hit(_)));
        fill(&mut store, "k4", 4);

        assert_eq!(store.len(), 3);
        assert!(store.contains("k1"));
        assert!(!store.contains("k2"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[tokio::test]
    async fn test_repopulate_replaces_without_eviction() {
        let mut store = CacheStore::new(1, TTL);
        fill(&mut store, "k", 1);

        let t = FetchTicket {
            generation: store.generation,
            started_at: Instant::now(),
        };
        assert!(store.populate("k".to_string(), value(2), t));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().evictions, 0);
    }
}
