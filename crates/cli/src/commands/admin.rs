//! Administrator account management commands.
//!
//! Administrators cannot sign up over HTTP; this is the only way to create
//! a row in `admin_account`.
//!
//! # Usage
//!
//! ```bash
//! SHOPDESK_ADMIN_PASSWORD=... shopdesk admin create -e admin@example.com -n "Admin Name" -p 555-0100
//! ```

use secrecy::{ExposeSecret, SecretString};
use shopdesk_core::AccountId;
use shopdesk_server::config::{ConfigError, ServerConfig};
use shopdesk_server::db::{self, AccountTable};
use shopdesk_server::services::auth::{Argon2Hasher, AuthError, AuthService, Registration};
use thiserror::Error;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Administrator already exists with email or phone: {0}")]
    UserExists(String),

    #[error(transparent)]
    Auth(AuthError),
}

/// Create a new administrator account.
///
/// # Returns
///
/// The ID of the created account.
///
/// # Errors
///
/// Returns `AdminError` if the email is malformed, the email or phone is
/// already registered, or the database is unreachable.
pub async fn create_user(
    email: &str,
    name: &str,
    phone: &str,
    password: &SecretString,
) -> Result<AccountId, AdminError> {
    let password = password.expose_secret();
    if password.is_empty() {
        return Err(AdminError::EmptyPassword);
    }

    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database).await?;

    let hasher = Argon2Hasher;
    let id = AuthService::new(&pool, AccountTable::Admin, &hasher)
        .register(Registration {
            name,
            email,
            phone,
            password,
            confirm_password: password,
        })
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => AdminError::UserExists(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    pool.close().await;
    tracing::info!("Administrator created successfully! ID: {}, Email: {}", id, email);
    Ok(id)
}
