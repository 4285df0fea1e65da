//! Record Store
//!
//! The authoritative storage for inventory items. Handlers and the item
//! cache talk to it only through the [`RecordStore`] trait so the engine
//! behind it can be swapped without touching either.

mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{InventoryItem, Price};

pub use memory::InMemoryRecordStore;

/// Result type for record store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Fields of an item about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub quantity: u64,
    pub price: Price,
}

/// Field updates for an existing item; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u64>,
    pub price: Option<Price>,
}

impl From<NewItem> for ItemChanges {
    fn from(item: NewItem) -> Self {
        Self {
            name: Some(item.name),
            description: Some(item.description),
            quantity: Some(item.quantity),
            price: Some(item.price),
        }
    }
}

/// Durable keyed storage for inventory items.
///
/// Names are unique across the store; `create` and `update` enforce this
/// themselves and report [`StoreError::Conflict`], so a uniqueness check done
/// beforehand by the caller cannot be raced.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Whether an item with this name exists, ignoring `exclude` if given.
    async fn exists_by_name(&self, name: &str, exclude: Option<u64>) -> StoreResult<bool>;

    /// Whether an item with this id exists.
    async fn exists(&self, id: u64) -> StoreResult<bool>;

    /// Fetches one item.
    async fn get(&self, id: u64) -> StoreResult<InventoryItem>;

    /// All items, ordered by id.
    async fn list(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Inserts a new item and assigns its id.
    async fn create(&self, item: NewItem) -> StoreResult<InventoryItem>;

    /// Applies `changes` to an existing item and returns the new state.
    async fn update(&self, id: u64, changes: ItemChanges) -> StoreResult<InventoryItem>;

    /// Removes an item.
    async fn delete(&self, id: u64) -> StoreResult<()>;
}
