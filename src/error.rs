//! Error types for the inventory service
//!
//! Three layers, each a thiserror enum:
//! - [`StoreError`] - failures reported by a record store
//! - [`CacheError`] - failures of a read-through cache lookup
//! - [`ApiError`] - everything a handler can answer with, rendered as JSON

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error ==
/// Errors reported by a [`RecordStore`](crate::store::RecordStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this id
    #[error("No inventory item matches id {0}")]
    NotFound(u64),

    /// Another record already uses this name
    #[error("inventory item with this name already exists: {0}")]
    Conflict(String),

    /// The backing store could not serve the request
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

// == Cache Error ==
/// Errors returned by [`ItemCacheManager::get`](crate::cache::ItemCacheManager::get).
#[derive(Error, Debug)]
pub enum CacheError {
    /// The store fetch behind a miss failed; passed through untouched
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The fetched record could not be turned into its cached representation
    #[error("Failed to serialize item {id}: {source}")]
    Serialization {
        id: u64,
        #[source]
        source: serde_json::Error,
    },
}

// == Field Errors ==
/// Validation messages keyed by field name, in the shape clients expect:
/// `{"name": ["This field is required."]}`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// == API Error ==
/// Unified error type for HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Request body failed field validation
    #[error("Invalid input: {0:?}")]
    Validation(FieldErrors),

    /// Request could not be understood at all
    #[error("{0}")]
    BadRequest(String),

    /// Route exists but does not serve this method
    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Builds a validation error carrying a single message for one field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        ApiError::Validation(errors)
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound("Not found.".to_string()),
            StoreError::Conflict(_) => {
                ApiError::field("name", "inventory item with this name already exists.")
            }
            StoreError::Unavailable(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Store(err) => err.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound("Not found.".to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::Validation(errors) => {
                tracing::warn!(?errors, "Rejected invalid input");
                Json(json!(errors))
            }
            other => {
                let message = other.to_string();
                if status.is_server_error() {
                    tracing::error!("Error occurred: {}", message);
                } else {
                    tracing::debug!("Error occurred: {}", message);
                }
                Json(json!({
                    "error": true,
                    "message": message,
                    "status_code": status.as_u16(),
                }))
            }
        };

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
