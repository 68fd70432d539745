//! Field validation rules for contact payloads.

use crate::constants::MIN_PHONE_LEN;
use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// `true` when `email` has a `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Reject blank required fields on create.
pub(crate) fn require_name_and_phone<'a>(
    name: Option<&'a str>,
    phone: Option<&'a str>,
) -> Result<(&'a str, &'a str), AppError> {
    match (non_blank(name), non_blank(phone)) {
        (Some(name), Some(phone)) => Ok((name, phone)),
        _ => Err(AppError::Validation(
            "Name and phone are required".to_string(),
        )),
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> Result<(), AppError> {
    if !is_valid_email(email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}

/// Phone numbers are checked for length only.
pub(crate) fn validate_phone(phone: &str) -> Result<(), AppError> {
    if phone.chars().count() < MIN_PHONE_LEN {
        return Err(AppError::Validation(format!(
            "Phone number must be at least {} digits",
            MIN_PHONE_LEN
        )));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
