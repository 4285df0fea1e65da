//! Item record and the request/response bodies of the HTTP API.

pub mod item;
pub mod requests;
pub mod responses;

pub use item::{InventoryItem, Price};
pub use requests::{ItemRequest, PriceInput, QuantityInput, TextInput};
pub use responses::{DeleteResponse, HealthResponse, StatsResponse};
