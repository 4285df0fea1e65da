//! Cache Statistics Module
//!
//! Counters describing how the item cache has been serving reads.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a live entry
    pub hits: u64,
    /// Lookups that found nothing live and went to the record store
    pub misses: u64,
    /// Store fetches installed as a new entry
    pub populates: u64,
    /// Store fetches dropped because an invalidation overtook them
    pub discarded: u64,
    /// Explicit invalidations (each call counts, present or not)
    pub invalidations: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
    /// Entries removed to respect the capacity bound
    pub evictions: u64,
    /// Entries currently held
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
