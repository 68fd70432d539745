//! HTTP request handlers.

/// Contact CRUD and list endpoints.
pub mod contact;
/// Liveness and fallback endpoints.
pub mod health;
