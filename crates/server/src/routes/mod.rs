//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (database reachable)
//!
//! # Catalog
//! GET    /products             - List catalog entries
//! POST   /products             - Create a catalog entry
//! PUT    /products/{id}        - Replace a catalog entry
//! DELETE /products/{id}        - Delete a catalog entry
//!
//! # Accounts
//! POST   /signup               - Register a customer account
//! POST   /signin               - Customer sign-in
//! POST   /signin-admin         - Administrator sign-in
//!
//! # Orders
//! POST   /api/orders           - Checkout
//! GET    /api/orders           - List orders, newest first
//! PUT    /api/orders/{id}      - Edit customer and shipping details
//! DELETE /api/orders/{id}      - Delete an order
//! ```

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Create the application router (without state or outer layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(auth::router())
        .merge(orders::router())
}

/// Body of responses that only carry a confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Collects the names of required fields that are absent.
///
/// Text fields count as absent when they are blank.
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub(crate) fn text(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let value = value.filter(|v| !v.trim().is_empty());
        if value.is_none() {
            self.missing.push(field);
        }
        value
    }

    pub(crate) fn value<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(field);
        }
        value
    }

    /// Fail if anything was missing.
    pub(crate) fn finish(self) -> Result<(), AppError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }

    pub(crate) fn into_error(self) -> AppError {
        AppError::BadRequest(format!(
            "Missing required fields: {}",
            self.missing.join(", ")
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_lists_every_missing_field() {
        let mut required = Required::default();
        let name = required.text("name", Some("  ".to_owned()));
        let price = required.value::<i32>("price", None);
        let email = required.text("email", Some("a@b.c".to_owned()));

        assert!(name.is_none());
        assert!(price.is_none());
        assert_eq!(email.as_deref(), Some("a@b.c"));

        let err = required.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad request: Missing required fields: name, price"
        );
    }

    #[test]
    fn test_required_passes_when_complete() {
        let mut required = Required::default();
        required.text("name", Some("Lamp".to_owned()));
        required.value("price", Some(3));
        assert!(required.finish().is_ok());
    }
}
