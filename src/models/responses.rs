//! Response DTOs for the inventory API
//!
//! Item bodies are the item's serialized representation and need no wrapper;
//! the types here cover the remaining endpoints.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `DELETE /api/inventory/items/:id/`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Item deleted successfully".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that went to the record store
    pub misses: u64,
    /// Store fetches whose result was installed in the cache
    pub populates: u64,
    /// Store fetches dropped because an invalidation overtook them
    pub discarded: u64,
    /// Entries removed after a write or delete
    pub invalidations: u64,
    /// Entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Entries dropped to stay under the capacity bound
    pub evictions: u64,
    /// Live entries right now
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            populates: stats.populates,
            discarded: stats.discarded,
            invalidations: stats.invalidations,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
