//! API Handlers
//!
//! HTTP request handlers for the inventory endpoints. Single-item reads go
//! through the item cache; every successful update or delete invalidates the
//! item's cache entry after the record store has accepted the change.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{Method, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{CachedValue, ItemCacheManager};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{DeleteResponse, HealthResponse, InventoryItem, ItemRequest, StatsResponse};
use crate::store::{InMemoryRecordStore, ItemChanges, RecordStore};

type ItemPath = std::result::Result<Path<u64>, PathRejection>;
type ItemBody = std::result::Result<Json<ItemRequest>, JsonRejection>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authoritative item storage
    pub store: Arc<dyn RecordStore>,
    /// Read-through cache in front of `store`
    pub cache: Arc<ItemCacheManager>,
}

impl AppState {
    /// Wires a store and a cache built on that same store.
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<ItemCacheManager>) -> Self {
        Self { store, cache }
    }

    /// Builds an in-memory store and an item cache sized from `config`.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        let cache = Arc::new(ItemCacheManager::from_config(store.clone(), config));
        Self::new(store, cache)
    }
}

fn represent(item: &InventoryItem) -> Result<Value> {
    item.to_representation()
        .map_err(|e| ApiError::Internal(format!("Failed to serialize item {}: {}", item.id, e)))
}

async fn ensure_exists(state: &AppState, path: ItemPath) -> Result<u64> {
    let Path(id) = path?;
    if state.store.exists(id).await? {
        Ok(id)
    } else {
        Err(ApiError::NotFound("Not found.".to_string()))
    }
}

async fn ensure_unique_name(state: &AppState, name: &str, exclude: Option<u64>) -> Result<()> {
    if state.store.exists_by_name(name, exclude).await? {
        warn!(name, "Attempt to reuse an existing item name");
        return Err(ApiError::field(
            "name",
            "inventory item with this name already exists.",
        ));
    }
    Ok(())
}

/// Handler for GET /api/inventory/items/
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Value>>> {
    let items = state.store.list().await?;
    let body = items.iter().map(represent).collect::<Result<Vec<_>>>()?;
    Ok(Json(body))
}

/// Handler for POST /api/inventory/items/
pub async fn create_item(
    State(state): State<AppState>,
    payload: ItemBody,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(req) = payload?;
    let new_item = req.into_new_item().map_err(ApiError::Validation)?;
    ensure_unique_name(&state, &new_item.name, None).await?;

    let item = state.store.create(new_item).await?;
    info!(id = item.id, "Created inventory item");

    Ok((StatusCode::CREATED, Json(represent(&item)?)))
}

/// Handler for GET /api/inventory/items/:id/
///
/// Existence is checked against the record store; the body comes from the
/// item cache.
pub async fn retrieve_item(
    State(state): State<AppState>,
    path: ItemPath,
) -> Result<Json<CachedValue>> {
    let id = ensure_exists(&state, path).await?;
    let value = state.cache.get(id).await?;
    info!(id, "Retrieved inventory item");
    Ok(Json(value))
}

/// Handler for PUT /api/inventory/items/:id/
pub async fn replace_item(
    State(state): State<AppState>,
    path: ItemPath,
    payload: ItemBody,
) -> Result<Json<Value>> {
    apply_update(state, path, payload, false).await
}

/// Handler for PATCH /api/inventory/items/:id/
pub async fn partial_update_item(
    State(state): State<AppState>,
    path: ItemPath,
    payload: ItemBody,
) -> Result<Json<Value>> {
    apply_update(state, path, payload, true).await
}

async fn apply_update(
    state: AppState,
    path: ItemPath,
    payload: ItemBody,
    partial: bool,
) -> Result<Json<Value>> {
    let id = ensure_exists(&state, path).await?;
    let Json(req) = payload?;

    let changes = if partial {
        req.into_changes()
    } else {
        req.into_new_item().map(ItemChanges::from)
    }
    .map_err(ApiError::Validation)?;

    if let Some(name) = &changes.name {
        ensure_unique_name(&state, name, Some(id)).await?;
    }

    let item = state.store.update(id, changes).await?;
    info!(id, partial, "Updated inventory item");
    state.cache.invalidate(id).await;

    Ok(Json(represent(&item)?))
}

/// Handler for DELETE /api/inventory/items/:id/
pub async fn delete_item(
    State(state): State<AppState>,
    path: ItemPath,
) -> Result<Json<DeleteResponse>> {
    let id = ensure_exists(&state, path).await?;

    state.store.delete(id).await?;
    info!(id, "Deleted inventory item");
    state.cache.invalidate(id).await;

    Ok(Json(DeleteResponse::deleted()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Answers a known path requested with a method it does not serve.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}

/// Answers any path no route matches.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found.".to_string())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default())
    }

    fn body(name: &str, quantity: i64) -> ItemBody {
        Ok(Json(ItemRequest {
            name: Some(name.into()),
            description: Some("This is a test item".into()),
            quantity: Some(quantity.into()),
            price: Some("9.99".into()),
        }))
    }

    fn path(id: u64) -> ItemPath {
        Ok(Path(id))
    }

    #[tokio::test]
    async fn test_create_and_retrieve() {
        let state = test_state();

        let (status, Json(created)) = create_item(State(state.clone()), body("Test Item", 10))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_u64().unwrap();

        let Json(fetched) = retrieve_item(State(state.clone()), path(id)).await.unwrap();
        assert_eq!(fetched["name"], "Test Item");
        assert!(state.cache.contains(id).await);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let state = test_state();
        create_item(State(state.clone()), body("Test Item", 10))
            .await
            .unwrap();

        let err = create_item(State(state), body("Test Item", 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref errors) if errors.contains_key("name")));
    }

    #[tokio::test]
    async fn test_update_invalidates_cache() {
        let state = test_state();
        let (_, Json(created)) = create_item(State(state.clone()), body("Test Item", 10))
            .await
            .unwrap();
        let id = created["id"].as_u64().unwrap();

        retrieve_item(State(state.clone()), path(id)).await.unwrap();
        assert!(state.cache.contains(id).await);

        let patch = Ok(Json(ItemRequest {
            quantity: Some(20_i64.into()),
            ..Default::default()
        }));
        let Json(updated) = partial_update_item(State(state.clone()), path(id), patch)
            .await
            .unwrap();
        assert_eq!(updated["quantity"], 20);
        assert!(!state.cache.contains(id).await);

        let Json(fetched) = retrieve_item(State(state), path(id)).await.unwrap();
        assert_eq!(fetched["quantity"], 20);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_cache_entry() {
        let state = test_state();
        let (_, Json(created)) = create_item(State(state.clone()), body("Test Item", 10))
            .await
            .unwrap();
        let id = created["id"].as_u64().unwrap();
        retrieve_item(State(state.clone()), path(id)).await.unwrap();

        let bad = Ok(Json(ItemRequest {
            quantity: Some((-3_i64).into()),
            ..Default::default()
        }));
        assert!(partial_update_item(State(state.clone()), path(id), bad)
            .await
            .is_err());
        assert!(state.cache.contains(id).await);
    }

    #[tokio::test]
    async fn test_put_requires_all_fields() {
        let state = test_state();
        let (_, Json(created)) = create_item(State(state.clone()), body("Test Item", 10))
            .await
            .unwrap();
        let id = created["id"].as_u64().unwrap();

        let partial = Ok(Json(ItemRequest {
            name: Some("Renamed".into()),
            ..Default::default()
        }));
        let err = replace_item(State(state), path(id), partial).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_then_retrieve_is_not_found() {
        let state = test_state();
        let (_, Json(created)) = create_item(State(state.clone()), body("Test Item", 10))
            .await
            .unwrap();
        let id = created["id"].as_u64().unwrap();
        retrieve_item(State(state.clone()), path(id)).await.unwrap();

        let Json(resp) = delete_item(State(state.clone()), path(id)).await.unwrap();
        assert_eq!(resp.message, "Item deleted successfully");
        assert!(!state.cache.contains(id).await);

        let err = retrieve_item(State(state), path(id)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_nonexistent_item() {
        let state = test_state();
        assert!(retrieve_item(State(state.clone()), path(9999)).await.is_err());
        assert!(delete_item(State(state.clone()), path(9999)).await.is_err());
        assert!(replace_item(State(state), path(9999), body("Nonexistent Item", 1))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
