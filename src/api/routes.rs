//! API Routes
//!
//! Configures the Axum router with all inventory endpoints.

use axum::{
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_item, delete_item, health_handler, list_items, method_not_allowed, not_found,
    partial_update_item, replace_item, retrieve_item, stats_handler, AppState,
};

/// Collection path; served with and without the trailing slash.
pub const ITEMS_PATH: &str = "/api/inventory/items";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/inventory/items/` - List items
/// - `POST /api/inventory/items/` - Create an item
/// - `GET /api/inventory/items/:id/` - Retrieve an item (cached)
/// - `PUT /api/inventory/items/:id/` - Replace an item
/// - `PATCH /api/inventory/items/:id/` - Partially update an item
/// - `DELETE /api/inventory/items/:id/` - Delete an item
/// - `GET /stats` - Item cache statistics
/// - `GET /health` - Health check endpoint
///
/// Unsupported methods and unknown paths answer with the JSON error envelope.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let item = format!("{}/:id", ITEMS_PATH);

    Router::new()
        .route(ITEMS_PATH, collection_routes())
        .route(&format!("{}/", ITEMS_PATH), collection_routes())
        .route(&item, item_routes())
        .route(&format!("{}/", item), item_routes())
        .route("/stats", get(stats_handler).fallback(method_not_allowed))
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn collection_routes() -> MethodRouter<AppState> {
    get(list_items)
        .post(create_item)
        .fallback(method_not_allowed)
}

fn item_routes() -> MethodRouter<AppState> {
    get(retrieve_item)
        .put(replace_item)
        .patch(partial_update_item)
        .delete(delete_item)
        .fallback(method_not_allowed)
}
