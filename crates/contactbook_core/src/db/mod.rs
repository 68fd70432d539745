//! Storage layer: the [`ContactStore`] seam and its redb/in-memory backends.

/// redb-backed contact table.
pub mod contact;
/// Process-local contact store.
pub mod memory;
/// redb table definitions.
pub mod tables;

use crate::config::{Config, StorageBackend};
use crate::constants::REDB_FILE_NAME;
use crate::error::AppError;
use crate::models::contact::{Contact, UpdateContactRequest};
use crate::query::{ContactPage, ContactQuery};
use std::path::Path;
use std::sync::Arc;

pub use contact::ContactDb;
pub use memory::MemoryContactDb;

/// Row-level contact storage.
///
/// Each call runs inside a single storage transaction (or lock scope), so a
/// read-then-write sequence inside one call observes no interleaved writers.
/// Implementations enforce email uniqueness themselves: an insert or update
/// that would give two contacts the same email fails with
/// [`AppError::Conflict`].
pub trait ContactStore: Send + Sync {
    /// Insert a new contact.
    ///
    /// # Errors
    /// Returns [`AppError::Conflict`] when the email is already held, or a
    /// storage error when the id already exists or the write fails.
    fn insert(&self, contact: &Contact) -> Result<(), AppError>;

    /// Fetch a contact by id.
    ///
    /// # Errors
    /// Returns an error when storage access or decoding fails.
    fn get(&self, id: &str) -> Result<Option<Contact>, AppError>;

    /// Fetch the contact currently holding `email`, compared exactly.
    ///
    /// # Errors
    /// Returns an error when storage access or decoding fails.
    fn find_by_email(&self, email: &str) -> Result<Option<Contact>, AppError>;

    /// Merge `update` into the stored contact.
    ///
    /// # Returns
    /// `Ok(Some(contact))` when updated, `Ok(None)` when the id is missing.
    ///
    /// # Errors
    /// Returns [`AppError::Conflict`] when the new email belongs to another
    /// contact, or a storage error when the write fails.
    fn update(&self, id: &str, update: &UpdateContactRequest)
        -> Result<Option<Contact>, AppError>;

    /// Delete a contact by id.
    ///
    /// # Returns
    /// `true` when a row was removed.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Run a filtered, sorted, paginated list query.
    ///
    /// The total count and the page come from the same read view.
    ///
    /// # Errors
    /// Returns an error when storage access or decoding fails.
    fn query(&self, query: &ContactQuery) -> Result<ContactPage, AppError>;
}

/// Database handle owning the redb file through its table accessors.
pub struct Database {
    pub contacts: ContactDb,
}

impl Database {
    /// Open (or create) the database under the `path` directory.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the file is held
    /// by another process, or tables cannot be initialized.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let file = dir.join(REDB_FILE_NAME);
        let db = match redb::Database::create(&file) {
            Ok(db) => Arc::new(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database '{}' is already open in another process.\n\
                    Stop the other Contactbook instance, or set DB_PATH to a different location.",
                    file.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            contacts: ContactDb::new(db)?,
        })
    }
}

/// Build the store selected by `config`.
///
/// # Errors
/// Returns an error when the redb store cannot be opened.
pub fn open_store(config: &Config) -> Result<Arc<dyn ContactStore>, AppError> {
    match config.storage {
        StorageBackend::Redb => {
            let database = Database::new(&config.db_path)?;
            tracing::info!(
                "Opened contact database at {}",
                Path::new(&config.db_path).join(REDB_FILE_NAME).display()
            );
            Ok(Arc::new(database.contacts))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory contact store; data will not persist");
            Ok(Arc::new(MemoryContactDb::default()))
        }
    }
}
