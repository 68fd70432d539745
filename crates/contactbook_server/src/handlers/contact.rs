//! Contact HTTP handlers.

use crate::extract::{ApiJson, ApiQuery};
use crate::{error::HttpError, response::ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contactbook_core::models::contact::{
    Contact, CreateContactRequest, ListContactsQuery, UpdateContactRequest,
};
use contactbook_core::query::ContactQuery;

/// Create a new contact.
///
/// # Returns
/// `201 Created` with the stored contact.
///
/// # Errors
/// Returns 400 for invalid fields and 409 for a taken email.
pub async fn create_contact(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Contact>>), HttpError> {
    let contact = state.service.create(req)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Contact created successfully", contact)),
    ))
}

/// List contacts with filtering, sorting and pagination.
///
/// # Errors
/// Returns 400 for malformed or disallowed query parameters.
pub async fn list_contacts(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListContactsQuery>,
) -> Result<Json<ApiResponse<Vec<Contact>>>, HttpError> {
    let query = ContactQuery::from_params(&params, state.config.max_page_limit)?;
    let page = state.service.list(&query)?;
    let pagination = page.pagination();
    Ok(Json(
        ApiResponse::success("Contacts retrieved successfully", page.contacts)
            .with_pagination(pagination),
    ))
}

/// Fetch a contact by id.
///
/// # Errors
/// Returns 404 when the contact does not exist.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Contact>>, HttpError> {
    let contact = state.service.get(&id)?;
    Ok(Json(ApiResponse::success(
        "Contact retrieved successfully",
        contact,
    )))
}

/// Apply a partial update.
///
/// # Errors
/// Returns 404 for an unknown id, 400 for invalid fields and 409 for a
/// taken email.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateContactRequest>,
) -> Result<Json<ApiResponse<Contact>>, HttpError> {
    let contact = state.service.update(&id, req)?;
    Ok(Json(ApiResponse::success(
        "Contact updated successfully",
        contact,
    )))
}

/// Delete a contact.
///
/// # Errors
/// Returns 404 when the contact does not exist.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, HttpError> {
    state.service.delete(&id)?;
    Ok(Json(ApiResponse::message("Contact deleted successfully")))
}
