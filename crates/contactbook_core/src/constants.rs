//! Shared constants used across Contactbook crates.

/// Default API port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default maximum request body size accepted by the API layer.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Page number used when a list request does not supply one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when a list request does not supply one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Minimum accepted phone length, counted in characters.
pub const MIN_PHONE_LEN: usize = 10;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "contacts.redb";
