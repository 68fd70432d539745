//! Contact business rules layered over a [`ContactStore`].

/// Field validation rules.
pub mod validation;

use crate::db::ContactStore;
use crate::error::AppError;
use crate::models::contact::{
    normalize_email, Contact, CreateContactRequest, UpdateContactRequest,
};
use crate::query::{ContactPage, ContactQuery};
use std::sync::Arc;

use self::validation::{require_name_and_phone, validate_email, validate_name, validate_phone};

/// Validates requests and forwards them to the configured store.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    /// Wrap a store.
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new contact.
    ///
    /// Checks run in order: required fields, email format, phone length, then
    /// email uniqueness. The store re-checks uniqueness inside its write
    /// transaction, so a concurrent create that slips past the first check
    /// still fails with [`AppError::Conflict`].
    ///
    /// # Errors
    /// Returns [`AppError::Validation`], [`AppError::Conflict`] or a storage error.
    pub fn create(&self, req: CreateContactRequest) -> Result<Contact, AppError> {
        let (name, phone) = require_name_and_phone(req.name.as_deref(), req.phone.as_deref())?;
        let email = normalize_email(req.email);
        if let Some(email) = email.as_deref() {
            validate_email(email)?;
        }
        validate_phone(phone)?;
        if let Some(email) = email.as_deref() {
            self.ensure_email_available(email, None)?;
        }

        let mut contact = Contact::new(name.to_string(), phone.to_string());
        contact.email = email;
        contact.tags = req.tags.unwrap_or_default();
        contact.is_favorite = req.is_favorite.unwrap_or(false);

        self.store.insert(&contact)?;
        tracing::debug!("Created contact {}", contact.id);
        Ok(contact)
    }

    /// Run a list query.
    ///
    /// # Errors
    /// Returns a storage error when the query cannot be executed.
    pub fn list(&self, query: &ContactQuery) -> Result<ContactPage, AppError> {
        self.store.query(query)
    }

    /// Fetch a contact by id.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] for an unknown id.
    pub fn get(&self, id: &str) -> Result<Contact, AppError> {
        self.store
            .get(id)?
            .ok_or_else(AppError::contact_not_found)
    }

    /// Validate and apply a partial update.
    ///
    /// Only fields present in `req` are validated and written.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`], [`AppError::Validation`],
    /// [`AppError::Conflict`] or a storage error.
    pub fn update(&self, id: &str, req: UpdateContactRequest) -> Result<Contact, AppError> {
        if self.store.get(id)?.is_none() {
            return Err(AppError::contact_not_found());
        }

        if let Some(name) = req.name.as_deref() {
            validate_name(name)?;
        }
        let email = normalize_email(req.email.clone());
        if let Some(email) = email.as_deref() {
            validate_email(email)?;
        }
        if let Some(phone) = req.phone.as_deref() {
            validate_phone(phone)?;
        }
        if let Some(email) = email.as_deref() {
            self.ensure_email_available(email, Some(id))?;
        }

        let updated = self
            .store
            .update(id, &req)?
            .ok_or_else(AppError::contact_not_found)?;
        tracing::debug!("Updated contact {}", id);
        Ok(updated)
    }

    /// Hard-delete a contact.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when nothing was deleted.
    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.store.delete(id)? {
            return Err(AppError::contact_not_found());
        }
        tracing::debug!("Deleted contact {}", id);
        Ok(())
    }

    fn ensure_email_available(&self, email: &str, owner: Option<&str>) -> Result<(), AppError> {
        match self.store.find_by_email(email)? {
            Some(existing) if Some(existing.id.as_str()) != owner => Err(AppError::email_taken()),
            _ => Ok(()),
        }
    }
}
