//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Every error is rendered as a
//! JSON body `{"message": "..."}`; server-side failures are logged and sent to
//! Sentry, and their details never reach the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::Constraint { .. } => StatusCode::BAD_REQUEST,
                RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::PasswordMismatch | AuthError::InvalidEmail(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server errors get an opaque text.
    fn public_message(&self) -> String {
        if self.status().is_server_error() {
            return "Internal server error".to_owned();
        }

        match self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_owned(),
            Self::Database(RepositoryError::Conflict(_)) => "Record already exists".to_owned(),
            Self::Database(RepositoryError::Constraint { kind, .. }) => {
                kind.public_message().to_owned()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password".to_owned(),
                AuthError::PasswordMismatch => "Passwords do not match!".to_owned(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_owned(),
                _ => "An account with this email or phone already exists".to_owned(),
            },
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Internal(msg) => msg.clone(),
            Self::Database(RepositoryError::Database(_)) => "Internal server error".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Violation;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Not found: Product not found");

        let err = AppError::BadRequest("Price is required".to_string());
        assert_eq!(err.to_string(), "Bad request: Price is required");
    }

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(
            status_of(AppError::BadRequest("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthError::UserAlreadyExists.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AuthError::PasswordMismatch.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RepositoryError::NotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RepositoryError::Conflict("signup_email_key".to_owned()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(
                RepositoryError::Constraint {
                    kind: Violation::MissingValue,
                    detail: "user_name".to_owned(),
                }
                .into()
            ),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RepositoryError::Database(sqlx::Error::PoolTimedOut).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_are_opaque() {
        let err: AppError = RepositoryError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.public_message(), "Internal server error");

        let err = AppError::Internal("connection string leaked here".to_owned());
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_constraint_detail_stays_server_side() {
        let err: AppError = RepositoryError::Constraint {
            kind: Violation::MissingValue,
            detail: r#"null value in column "user_name" of relation "customer_order""#
                .to_owned(),
        }
        .into();
        assert_eq!(err.public_message(), "Missing required field");

        let err: AppError = RepositoryError::Constraint {
            kind: Violation::UnknownReference,
            detail: "customer_order_product_id_fkey".to_owned(),
        }
        .into();
        assert_eq!(err.public_message(), "Referenced product does not exist");
        assert!(err.to_string().contains("customer_order_product_id_fkey"));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = AppError::NotFound("Order not found.".to_owned());
        assert_eq!(err.public_message(), "Order not found.");

        let err: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(err.public_message(), "Invalid email or password");
    }
}
