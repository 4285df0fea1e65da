//! Cache Entry Module
//!
//! A cached item representation together with its expiry instant.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// Opaque cached value. Shared, never mutated after insertion.
pub type CachedValue = Arc<serde_json::Value>;

// == Cache Entry ==
/// A single cache entry.
///
/// Timestamps come from [`tokio::time::Instant`], so tests running on a
/// paused runtime can move the clock forward without sleeping.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored representation
    pub value: CachedValue,
    /// When the entry was inserted
    pub created_at: Instant,
    /// When the entry stops being served
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after now.
    pub fn new(value: CachedValue, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Whether the entry is past its expiry.
    ///
    /// An entry is expired from the exact instant its TTL has fully elapsed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a given instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
