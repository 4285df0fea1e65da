//! API Module
//!
//! HTTP handlers and routing for the inventory REST API.
//!
//! # Endpoints
//! - `GET|POST /api/inventory/items/` - List or create items
//! - `GET|PUT|PATCH|DELETE /api/inventory/items/:id/` - Single item
//! - `GET /stats` - Item cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
