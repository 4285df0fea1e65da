//! In-process record store backed by a `BTreeMap`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{ItemChanges, NewItem, RecordStore, StoreResult};
use crate::error::StoreError;
use crate::models::InventoryItem;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<u64, InventoryItem>,
    last_id: u64,
}

impl Table {
    fn name_taken(&self, name: &str, exclude: Option<u64>) -> bool {
        self.rows
            .values()
            .any(|item| item.name == name && Some(item.id) != exclude)
    }
}

/// [`RecordStore`] that keeps every item in memory.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    table: RwLock<Table>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn exists_by_name(&self, name: &str, exclude: Option<u64>) -> StoreResult<bool> {
        Ok(self.table.read().await.name_taken(name, exclude))
    }

    async fn exists(&self, id: u64) -> StoreResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn get(&self, id: u64) -> StoreResult<InventoryItem> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn create(&self, item: NewItem) -> StoreResult<InventoryItem> {
        let mut table = self.table.write().await;
        if table.name_taken(&item.name, None) {
            return Err(StoreError::Conflict(item.name));
        }

        table.last_id += 1;
        let now = Utc::now();
        let record = InventoryItem {
            id: table.last_id,
            name: item.name,
            description: item.description,
            quantity: item.quantity,
            price: item.price,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, record.clone());

        debug!(id = record.id, "Inserted item");
        Ok(record)
    }

    async fn update(&self, id: u64, changes: ItemChanges) -> StoreResult<InventoryItem> {
        let mut table = self.table.write().await;
        if let Some(name) = &changes.name {
            if table.name_taken(name, Some(id)) {
                return Err(StoreError::Conflict(name.clone()));
            }
        }

        let record = table.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(name) = changes.name {
            record.name = name;
        }
        if let Some(description) = changes.description {
            record.description = description;
        }
        if let Some(quantity) = changes.quantity {
            record.quantity = quantity;
        }
        if let Some(price) = changes.price {
            record.price = price;
        }
        record.updated_at = Utc::now();

        debug!(id, "Updated item");
        Ok(record.clone())
    }

    async fn delete(&self, id: u64) -> StoreResult<()> {
        match self.table.write().await.rows.remove(&id) {
            Some(_) => {
                debug!(id, "Deleted item");
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }
}
