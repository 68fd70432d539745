//! Shared test-only helpers for contactbook_core.

use crate::db::{ContactStore, Database, MemoryContactDb};
use crate::models::contact::Contact;
use std::sync::Arc;
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
///
/// # Panics
/// Panics if temp-dir creation, path conversion, or database initialization
/// fails in the test environment.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Both store implementations, labelled for assertion messages.
///
/// The returned [`TempDir`] owns the redb file and must outlive the stores.
pub(crate) fn all_stores() -> (Vec<(&'static str, Arc<dyn ContactStore>)>, TempDir) {
    let (db, temp_dir) = setup_temp_db();
    let stores: Vec<(&'static str, Arc<dyn ContactStore>)> = vec![
        ("redb", Arc::new(db.contacts)),
        ("memory", Arc::new(MemoryContactDb::default())),
    ];
    (stores, temp_dir)
}

/// Build a contact with the given name/phone and optional email.
pub(crate) fn sample_contact(name: &str, phone: &str, email: Option<&str>) -> Contact {
    let mut contact = Contact::new(name.to_string(), phone.to_string());
    contact.email = email.map(str::to_string);
    contact
}
