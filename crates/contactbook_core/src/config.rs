//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Which [`crate::db::ContactStore`] implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Persistent redb table under `db_path`.
    #[default]
    Redb,
    /// Process-local store; contents are lost on exit.
    Memory,
}

impl StorageBackend {
    /// Parse a backend name (`redb` or `memory`, case-insensitive).
    ///
    /// # Returns
    /// `Some(backend)` for recognized names, otherwise `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redb" | "disk" | "persistent" => Some(Self::Redb),
            "memory" | "in-memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Runtime configuration for Contactbook.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub max_body_size: usize,
    /// Upper bound for `limit` on list requests; `None` leaves it unbounded.
    pub max_page_limit: Option<u32>,
    /// Directory served for paths no API route claims.
    pub static_dir: Option<String>,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn storage_from_env() -> StorageBackend {
    match env::var("STORAGE") {
        Ok(value) => StorageBackend::parse(&value).unwrap_or_else(|| {
            tracing::warn!("Unknown STORAGE='{}'; falling back to redb", value);
            StorageBackend::Redb
        }),
        Err(_) => StorageBackend::default(),
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("DB_PATH").map(expand_tilde).unwrap_or_else(|_| {
                let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                home.join(".cache")
                    .join("contactbook")
                    .join("db")
                    .to_string_lossy()
                    .to_string()
            }),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            storage: storage_from_env(),
            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),
            max_page_limit: env::var("MAX_PAGE_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|limit: &u32| *limit > 0),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(expand_tilde),
        }
    }
}
