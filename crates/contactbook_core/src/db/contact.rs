//! Contact storage operations backed by redb.

use super::tables::{CONTACTS, CONTACTS_BY_EMAIL};
use super::ContactStore;
use crate::error::AppError;
use crate::models::contact::{
    apply_update_request, decode_tags, encode_tags, Contact, UpdateContactRequest,
};
use crate::query::{ContactPage, ContactQuery};
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persisted row layout. Tags live in one JSON-text column.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContactRow {
    id: String,
    name: String,
    email: Option<String>,
    phone: String,
    tags: String,
    is_favorite: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn from_contact(contact: &Contact) -> Result<Self, AppError> {
        Ok(Self {
            id: contact.id.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            tags: encode_tags(&contact.tags)?,
            is_favorite: contact.is_favorite,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        })
    }

    fn to_contact(&self) -> Result<Contact, AppError> {
        Ok(Contact {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            tags: decode_tags(&self.tags)?,
            is_favorite: self.is_favorite,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn decode_row(bytes: &[u8]) -> Result<ContactRow, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Accessor for contact-related redb tables.
pub struct ContactDb {
    db: Arc<redb::Database>,
}

impl ContactDb {
    /// Initialize contact tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(CONTACTS)?;
        write_txn.open_table(CONTACTS_BY_EMAIL)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Number of stored contacts.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn len(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let contacts = read_txn.open_table(CONTACTS)?;
        Ok(contacts.len()?)
    }

    /// `true` when no contacts are stored.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}

impl ContactStore for ContactDb {
    fn insert(&self, contact: &Contact) -> Result<(), AppError> {
        let row = ContactRow::from_contact(contact)?;
        let encoded = bincode::serialize(&row)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut contacts = write_txn.open_table(CONTACTS)?;
            let mut emails = write_txn.open_table(CONTACTS_BY_EMAIL)?;

            if contacts.get(row.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "Contact id '{}' already exists",
                    row.id
                )));
            }
            if let Some(email) = row.email.as_deref() {
                if emails.get(email)?.is_some() {
                    return Err(AppError::email_taken());
                }
                emails.insert(email, row.id.as_str())?;
            }
            contacts.insert(row.id.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        tracing::debug!("Inserted contact {}", contact.id);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Contact>, AppError> {
        let read_txn = self.db.begin_read()?;
        let contacts = read_txn.open_table(CONTACTS)?;
        match contacts.get(id)? {
            Some(value) => Ok(Some(decode_row(value.value())?.to_contact()?)),
            None => Ok(None),
        }
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Contact>, AppError> {
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(CONTACTS_BY_EMAIL)?;
        let contacts = read_txn.open_table(CONTACTS)?;
        let Some(owner) = emails.get(email)? else {
            return Ok(None);
        };
        match contacts.get(owner.value())? {
            Some(value) => Ok(Some(decode_row(value.value())?.to_contact()?)),
            None => Err(AppError::StorageMessage(format!(
                "Email index points at missing contact '{}'",
                owner.value()
            ))),
        }
    }

    fn update(
        &self,
        id: &str,
        update: &UpdateContactRequest,
    ) -> Result<Option<Contact>, AppError> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut contacts = write_txn.open_table(CONTACTS)?;
            let mut emails = write_txn.open_table(CONTACTS_BY_EMAIL)?;

            let Some(old_guard) = contacts.get(id)? else {
                return Ok(None);
            };
            let mut contact = decode_row(old_guard.value())?.to_contact()?;
            drop(old_guard);
            let old_email = contact.email.clone();

            apply_update_request(&mut contact, update);

            if contact.email != old_email {
                if let Some(new_email) = contact.email.as_deref() {
                    let owner = emails.get(new_email)?.map(|guard| guard.value().to_string());
                    if owner.is_some_and(|owner| owner != id) {
                        return Err(AppError::email_taken());
                    }
                    emails.insert(new_email, id)?;
                }
                if let Some(old_email) = old_email.as_deref() {
                    let _ = emails.remove(old_email)?;
                }
            }

            let encoded = bincode::serialize(&ContactRow::from_contact(&contact)?)?;
            contacts.insert(id, encoded.as_slice())?;
            contact
        };
        write_txn.commit()?;
        tracing::debug!("Updated contact {}", id);
        Ok(Some(updated))
    }

    fn delete(&self, id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut contacts = write_txn.open_table(CONTACTS)?;
            let mut emails = write_txn.open_table(CONTACTS_BY_EMAIL)?;

            let Some(old_guard) = contacts.remove(id)? else {
                return Ok(false);
            };
            let row = decode_row(old_guard.value())?;
            drop(old_guard);
            if let Some(email) = row.email.as_deref() {
                let _ = emails.remove(email)?;
            }
        }
        write_txn.commit()?;
        tracing::debug!("Deleted contact {}", id);
        Ok(true)
    }

    fn query(&self, query: &ContactQuery) -> Result<ContactPage, AppError> {
        let plan = query.plan();
        let read_txn = self.db.begin_read()?;
        let contacts = read_txn.open_table(CONTACTS)?;

        let mut matched = Vec::new();
        for item in contacts.iter()? {
            let (_, value) = item?;
            let row = decode_row(value.value())?;
            let contact = row.to_contact()?;
            if plan.matches(&contact, &row.tags) {
                matched.push(contact);
            }
        }

        Ok(plan.into_page(matched))
    }
}
