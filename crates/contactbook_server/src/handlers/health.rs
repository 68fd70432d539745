//! Liveness and fallback handlers.

use crate::error::HttpError;
use axum::Json;
use contactbook_core::AppError;
use serde_json::{json, Value};

/// Report that the API is up.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Contact Management API is running"
    }))
}

/// Envelope-shaped 404 for unknown routes.
pub async fn not_found() -> HttpError {
    AppError::NotFound("Route not found".to_string()).into()
}
