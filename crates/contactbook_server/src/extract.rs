//! Extractors whose rejections render through [`HttpError`].

use crate::error::HttpError;
use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::Json;

/// JSON body extractor reporting malformed bodies as 400 envelopes.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(HttpError))]
pub struct ApiJson<T>(pub T);

/// Query-string extractor reporting malformed queries as 400 envelopes.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(HttpError))]
pub struct ApiQuery<T>(pub T);
