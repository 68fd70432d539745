//! Core domain library for Contactbook (config, storage, queries, validation).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Storage trait and backends.
pub mod db;
/// Test-only environment mutation helpers.
pub mod env;
/// Application error types (storage/domain).
pub mod error;
/// Data models for API requests and persistence.
pub mod models;
/// List query parsing, filtering, sorting and pagination.
pub mod query;
/// Validation and business rules.
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, StorageBackend};
pub use constants::DEFAULT_PORT;
pub use db::{open_store, ContactStore, Database};
pub use error::{AppError, ErrorKind};
pub use service::ContactService;
