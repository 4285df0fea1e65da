//! Cache Purge Task
//!
//! Background task that periodically drops expired item cache entries.
//! Lookups already ignore expired entries; this keeps memory from holding
//! items nobody reads again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ItemCacheManager;

/// Spawns a background task that purges expired entries every
/// `cleanup_interval_secs` seconds.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<ItemCacheManager>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache purge task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;
            if removed > 0 {
                info!("Cache purge: removed {} expired entries", removed);
            } else {
                debug!("Cache purge: no expired entries found");
            }
        }
    })
}
