//! Process-global environment mutation helpers.
//!
//! [`crate::Config::from_env`] and the server's `BIND` resolution read the
//! process environment directly, so tests that exercise them mutate it
//! through these helpers while holding [`env_lock`].

use std::sync::{Mutex, OnceLock};

fn global_env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Return the global lock used to serialize environment mutations in tests.
///
/// # Returns
/// A process-wide mutex for synchronizing environment mutation.
pub fn env_lock() -> &'static Mutex<()> {
    global_env_lock()
}

/// Set an environment variable through a compatibility wrapper.
///
/// Rust toolchains differ on whether env mutation APIs are `unsafe`.
///
/// # Arguments
/// - `key`: Environment variable name.
/// - `value`: Value to assign.
#[allow(unused_unsafe)]
pub fn set_env_var(key: &str, value: &str) {
    // SAFETY: Callers must serialize mutation when test threads may run in parallel.
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Remove an environment variable through a compatibility wrapper.
///
/// Rust toolchains differ on whether env mutation APIs are `unsafe`.
#[allow(unused_unsafe)]
pub fn remove_env_var(key: &str) {
    // SAFETY: Callers must serialize mutation when test threads may run in parallel.
    unsafe {
        std::env::remove_var(key);
    }
}

/// Restores an environment variable value on drop.
pub struct EnvGuard {
    key: String,
    previous: Option<String>,
}

impl EnvGuard {
    /// Set `key=value` and restore the previous value when dropped.
    ///
    /// # Arguments
    /// - `key`: Environment variable name, e.g. `PORT` or `STORAGE`.
    /// - `value`: Value to assign for the lifetime of this guard.
    ///
    /// # Returns
    /// Guard that restores the previous value on drop.
    pub fn set(key: &str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        set_env_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }

    /// Remove `key` and restore the previous value when dropped.
    ///
    /// Used to force a config default, such as an unset `BIND`.
    ///
    /// # Returns
    /// Guard that restores the previous value on drop.
    pub fn remove(key: &str) -> Self {
        let previous = std::env::var(key).ok();
        remove_env_var(key);
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.previous.as_deref() {
            Some(previous) => set_env_var(self.key.as_str(), previous),
            None => remove_env_var(self.key.as_str()),
        }
    }
}
