//! Contact entity and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored contact as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a contact.
///
/// `name` and `phone` are optional here so a missing field surfaces as a
/// validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

/// Request payload for a partial contact update.
///
/// Absent keys are left untouched. An empty `email` clears the stored email.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

/// Raw query-string parameters for listing contacts.
///
/// Values stay as strings so that malformed numbers and flags are reported
/// through [`crate::AppError::Validation`] by [`crate::query::ContactQuery::from_params`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContactsQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub is_favorite: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Build pagination metadata for an effective page/limit and match count.
    ///
    /// `limit` must already be clamped to at least 1.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit_wide = u64::from(limit.max(1));
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit_wide),
        }
    }
}

impl Contact {
    /// Create a new contact with a fresh id and matching timestamps.
    ///
    /// # Arguments
    /// - `name`: Display name.
    /// - `phone`: Phone number, stored verbatim.
    ///
    /// # Returns
    /// A new [`Contact`] with no email, no tags and `is_favorite = false`.
    pub fn new(name: String, phone: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            name,
            email: None,
            phone,
            tags: Vec::new(),
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Encode tags as JSON-array text.
///
/// # Errors
/// Returns an error if JSON encoding fails.
pub fn encode_tags(tags: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tags)
}

/// Decode JSON-array tag text back into an ordered list.
///
/// # Errors
/// Returns an error if the text is not a JSON array of strings.
pub fn decode_tags(encoded: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(encoded)
}

/// Treat empty or whitespace-only emails as absent.
///
/// Other values are kept verbatim so the format check sees surrounding
/// whitespace.
pub fn normalize_email(email: Option<String>) -> Option<String> {
    email.filter(|raw| !raw.trim().is_empty())
}

/// Merge an update payload into `contact` and bump `updated_at`.
///
/// `updated_at` never moves backwards even if the wall clock does.
pub fn apply_update_request(contact: &mut Contact, update: &UpdateContactRequest) {
    if let Some(name) = &update.name {
        contact.name = name.clone();
    }
    if let Some(email) = &update.email {
        contact.email = normalize_email(Some(email.clone()));
    }
    if let Some(phone) = &update.phone {
        contact.phone = phone.clone();
    }
    if let Some(tags) = &update.tags {
        contact.tags = tags.clone();
    }
    if let Some(is_favorite) = update.is_favorite {
        contact.is_favorite = is_favorite;
    }

    contact.updated_at = Utc::now().max(contact.updated_at);
}
