//! In-memory contact store.

use super::ContactStore;
use crate::error::AppError;
use crate::models::contact::{apply_update_request, encode_tags, Contact, UpdateContactRequest};
use crate::query::{ContactPage, ContactQuery};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Contacts held in insertion order behind a single lock.
///
/// Matches [`super::ContactDb`] semantics, including the encoded-tag filter
/// and the storage-level email uniqueness check, so either can back the
/// service.
#[derive(Debug, Default)]
pub struct MemoryContactDb {
    rows: RwLock<Vec<Contact>>,
}

fn email_held_by_other(rows: &[Contact], email: &str, id: &str) -> bool {
    rows.iter()
        .any(|row| row.id != id && row.email.as_deref() == Some(email))
}

impl MemoryContactDb {
    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Contact>>, AppError> {
        self.rows
            .read()
            .map_err(|_| AppError::StorageMessage("Contact store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Contact>>, AppError> {
        self.rows
            .write()
            .map_err(|_| AppError::StorageMessage("Contact store lock poisoned".to_string()))
    }
}

impl ContactStore for MemoryContactDb {
    fn insert(&self, contact: &Contact) -> Result<(), AppError> {
        let mut rows = self.write()?;
        if rows.iter().any(|row| row.id == contact.id) {
            return Err(AppError::StorageMessage(format!(
                "Contact id '{}' already exists",
                contact.id
            )));
        }
        if let Some(email) = contact.email.as_deref() {
            if email_held_by_other(&rows, email, &contact.id) {
                return Err(AppError::email_taken());
            }
        }
        rows.push(contact.clone());
        tracing::debug!("Inserted contact {}", contact.id);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Contact>, AppError> {
        Ok(self.read()?.iter().find(|row| row.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Contact>, AppError> {
        Ok(self
            .read()?
            .iter()
            .find(|row| row.email.as_deref() == Some(email))
            .cloned())
    }

    fn update(
        &self,
        id: &str,
        update: &UpdateContactRequest,
    ) -> Result<Option<Contact>, AppError> {
        let mut rows = self.write()?;
        let Some(index) = rows.iter().position(|row| row.id == id) else {
            return Ok(None);
        };

        let mut contact = rows[index].clone();
        apply_update_request(&mut contact, update);
        if let Some(email) = contact.email.as_deref() {
            if email_held_by_other(&rows, email, id) {
                return Err(AppError::email_taken());
            }
        }

        rows[index] = contact.clone();
        tracing::debug!("Updated contact {}", id);
        Ok(Some(contact))
    }

    fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut rows = self.write()?;
        let Some(index) = rows.iter().position(|row| row.id == id) else {
            return Ok(false);
        };
        rows.remove(index);
        tracing::debug!("Deleted contact {}", id);
        Ok(true)
    }

    fn query(&self, query: &ContactQuery) -> Result<ContactPage, AppError> {
        let plan = query.plan();
        let rows = self.read()?;
        let mut matched = Vec::new();
        for row in rows.iter() {
            if plan.matches(row, &encode_tags(&row.tags)?) {
                matched.push(row.clone());
            }
        }
        Ok(plan.into_page(matched))
    }
}
