//! Inventory API - CRUD service for inventory items
//!
//! Single-item reads are served through a read-through cache with a fixed
//! TTL; updates and deletes invalidate the affected entry once the record
//! store has accepted the change.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::ItemCacheManager;
pub use config::Config;
pub use store::{InMemoryRecordStore, RecordStore};
pub use tasks::spawn_cleanup_task;
