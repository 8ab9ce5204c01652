//! Request extractors that reject with [`AppError`].
//!
//! axum's stock `Json` and `Path` extractors answer malformed input with
//! plain-text 415/422 responses. These wrappers route the rejection through
//! `AppError`, so clients always get a 400 with a JSON body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
