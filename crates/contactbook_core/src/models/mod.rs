//! Data models for API requests and persistence.

/// Contact entity, request payloads and pagination metadata.
pub mod contact;
