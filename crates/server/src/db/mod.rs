//! Database operations for the Shopdesk `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `product` - Catalog entries
//! - `signup` - Customer accounts
//! - `admin_account` - Administrator accounts
//! - `customer_order` - Checkout orders with a product snapshot
//!
//! Every repository method runs exactly one parameterized statement. Reads
//! return typed rows; writes return a [`WriteOutcome`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p shopdesk-cli -- migrate
//! ```

pub mod accounts;
pub mod orders;
pub mod products;

use std::str::FromStr;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use thiserror::Error;

pub use accounts::{AccountRepository, AccountTable};
pub use orders::OrderRepository;
pub use products::ProductRepository;

use crate::config::{CertVerification, DatabaseConfig, TlsRequirement};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The targeted row does not exist (zero rows affected).
    #[error("not found")]
    NotFound,

    /// Unique constraint violation (e.g., duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Not-null, check, foreign key or range violation caused by submitted
    /// values. `detail` is the driver's text and is only logged.
    #[error("constraint violation: {detail}")]
    Constraint { kind: Violation, detail: String },
}

/// What a rejected write did wrong, in terms safe to show a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A required column was left empty.
    MissingValue,
    /// A foreign key names a row that does not exist.
    UnknownReference,
    /// A value is out of range or fails a check.
    InvalidValue,
}

impl Violation {
    /// Classify a driver error by kind and SQLSTATE.
    fn classify(kind: &ErrorKind, code: Option<&str>) -> Option<Self> {
        match kind {
            ErrorKind::NotNullViolation => Some(Self::MissingValue),
            ErrorKind::ForeignKeyViolation => Some(Self::UnknownReference),
            ErrorKind::CheckViolation => Some(Self::InvalidValue),
            // numeric_value_out_of_range, string_data_right_truncation
            _ => matches!(code, Some("22003" | "22001")).then_some(Self::InvalidValue),
        }
    }

    #[must_use]
    pub const fn public_message(self) -> &'static str {
        match self {
            Self::MissingValue => "Missing required field",
            Self::UnknownReference => "Referenced product does not exist",
            Self::InvalidValue => "Invalid field value",
        }
    }
}

impl RepositoryError {
    /// Classify a driver error, pulling constraint violations out of the
    /// generic database bucket.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            let detail = db_err
                .constraint()
                .map_or_else(|| db_err.message().to_owned(), ToOwned::to_owned);
            let kind = db_err.kind();
            if matches!(kind, ErrorKind::UniqueViolation) {
                return Self::Conflict(detail);
            }
            if let Some(kind) = Violation::classify(&kind, db_err.code().as_deref()) {
                return Self::Constraint { kind, detail };
            }
        }
        Self::Database(err)
    }
}

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub rows_affected: u64,
    /// Generated key, set for insertions.
    pub insert_id: Option<i32>,
}

impl WriteOutcome {
    #[must_use]
    pub const fn inserted(id: i32) -> Self {
        Self {
            rows_affected: 1,
            insert_id: Some(id),
        }
    }

    #[must_use]
    pub const fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            insert_id: None,
        }
    }

    /// Treat a write that matched no row as `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when `rows_affected` is zero.
    pub const fn require_match(self) -> Result<Self, RepositoryError> {
        if self.rows_affected == 0 {
            Err(RepositoryError::NotFound)
        } else {
            Ok(self)
        }
    }
}

/// Map the two transport settings onto a libpq SSL mode.
#[must_use]
pub const fn ssl_mode(encrypt: TlsRequirement, verify: CertVerification) -> PgSslMode {
    match (encrypt, verify) {
        (TlsRequirement::Require, CertVerification::Strict) => PgSslMode::VerifyFull,
        (TlsRequirement::Require, CertVerification::Lenient) => PgSslMode::Require,
        (TlsRequirement::Optional, _) => PgSslMode::Prefer,
    }
}

/// Build connection options from configuration.
///
/// # Errors
///
/// Returns `sqlx::Error::Configuration` if `DATABASE_URL` cannot be parsed.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let mut options = match &config.url {
        Some(url) => PgConnectOptions::from_str(url.expose_secret())?,
        None => PgConnectOptions::new(),
    };

    if let Some(host) = &config.host {
        options = options.host(host);
    }
    if let Some(port) = config.port {
        options = options.port(port);
    }
    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = config.password() {
        options = options.password(password);
    }
    if let Some(name) = &config.name {
        options = options.database(name);
    }

    options = options.ssl_mode(ssl_mode(config.tls.encrypt, config.tls.verify));
    if let Some(root_cert) = &config.tls.root_cert {
        options = options.ssl_root_cert(root_cert);
    }

    Ok(options)
}

/// Create the `PostgreSQL` connection pool.
///
/// Opens a connection before returning, so an unreachable host, rejected
/// credentials or a failed TLS handshake surface here rather than on the
/// first request.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(config)?;
    pool_options(config).connect_with(options).await
}

/// Create a pool that connects on first use.
///
/// Used by tests that exercise routes which never reach the database.
///
/// # Errors
///
/// Returns `sqlx::Error::Configuration` if `DATABASE_URL` cannot be parsed.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(config)?;
    Ok(pool_options(config).connect_lazy_with(options))
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
}

/// Run `SELECT 1` against the pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if no connection is available or the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
