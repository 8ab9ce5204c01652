//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Server
//! - `SHOPDESK_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPDESK_PORT` - Listen port (default: 5000)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//!
//! ## Database
//! - `DATABASE_URL` - Optional full `PostgreSQL` URL used as the base
//! - `DB_HOST` - Database host (default: localhost)
//! - `DB_PORT` - Database port (default: 5432)
//! - `DB_USER` - Database user (default: postgres)
//! - `DB_PASSWORD` - Database password (default: empty)
//! - `DB_NAME` - Database name (default: shopdesk)
//! - `DB_SSL` - `require` or `optional` (default: optional)
//! - `DB_SSL_VERIFY` - `strict` or `lenient` (default: strict)
//! - `DB_SSL_ROOT_CERT` - CA bundle used to verify the server certificate
//! - `DB_MAX_CONNECTIONS` - Pool upper bound (default: 10)
//! - `DB_MIN_CONNECTIONS` - Idle connections kept open (default: 2)
//! - `DB_ACQUIRE_TIMEOUT_SECS` - How long a request waits for a connection (default: 10)
//!
//! When `DATABASE_URL` is set, the discrete `DB_*` connection variables that
//! are also set override the matching parts of the URL.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Whether the database connection must be encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsRequirement {
    /// Refuse to connect without TLS.
    Require,
    /// Use TLS when the server offers it.
    #[default]
    Optional,
}

impl FromStr for TlsRequirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "require" | "required" | "true" => Ok(Self::Require),
            "optional" | "prefer" | "false" => Ok(Self::Optional),
            other => Err(format!("expected `require` or `optional`, got `{other}`")),
        }
    }
}

/// How strictly the server certificate is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CertVerification {
    /// Verify the chain and the host name.
    #[default]
    Strict,
    /// Accept any certificate (managed databases with self-signed certs).
    Lenient,
}

impl FromStr for CertVerification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "true" => Ok(Self::Strict),
            "lenient" | "false" => Ok(Self::Lenient),
            other => Err(format!("expected `strict` or `lenient`, got `{other}`")),
        }
    }
}

/// Transport security for the database connection.
#[derive(Debug, Clone, Default)]
pub struct DatabaseTls {
    pub encrypt: TlsRequirement,
    pub verify: CertVerification,
    pub root_cert: Option<PathBuf>,
}

/// Database connection and pool settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Base URL; the discrete fields below are applied on top of it.
    pub url: Option<SecretString>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<SecretString>,
    pub name: Option<String>,
    pub tls: DatabaseTls,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("name", &self.name)
            .field("tls", &self.tls)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: None,
            user: None,
            password: None,
            name: None,
            tls: DatabaseTls::default(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    pub database: DatabaseConfig,
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env.parse_or("SHOPDESK_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("SHOPDESK_PORT", 5000_u16)?;
        let log_format = match env.get("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "LOG_FORMAT".to_owned(),
                    format!("expected `text` or `json`, got `{other}`"),
                ));
            }
        };

        Ok(Self {
            host,
            port,
            database: DatabaseConfig::from_env(&env)?,
            log_format,
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let url = env.get("DATABASE_URL").map(SecretString::from);

        // Without a base URL the discrete variables fall back to local defaults.
        let (host, port, user, name) = if url.is_some() {
            (
                env.get("DB_HOST"),
                env.parse_opt::<u16>("DB_PORT")?,
                env.get("DB_USER"),
                env.get("DB_NAME"),
            )
        } else {
            (
                Some(env.get("DB_HOST").unwrap_or_else(|| "localhost".to_owned())),
                Some(env.parse_or("DB_PORT", 5432_u16)?),
                Some(env.get("DB_USER").unwrap_or_else(|| "postgres".to_owned())),
                Some(env.get("DB_NAME").unwrap_or_else(|| "shopdesk".to_owned())),
            )
        };

        let tls = DatabaseTls {
            encrypt: env.parse_or("DB_SSL", TlsRequirement::Optional)?,
            verify: env.parse_or("DB_SSL_VERIFY", CertVerification::Strict)?,
            root_cert: env.get("DB_SSL_ROOT_CERT").map(PathBuf::from),
        };

        let max_connections = env.parse_or("DB_MAX_CONNECTIONS", defaults.max_connections)?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "DB_MAX_CONNECTIONS".to_owned(),
                "must be at least 1".to_owned(),
            ));
        }
        let min_connections = env
            .parse_or("DB_MIN_CONNECTIONS", defaults.min_connections)?
            .min(max_connections);
        let acquire_timeout = Duration::from_secs(env.parse_or(
            "DB_ACQUIRE_TIMEOUT_SECS",
            defaults.acquire_timeout.as_secs(),
        )?);

        Ok(Self {
            url,
            host,
            port,
            user,
            password: env.get("DB_PASSWORD").map(SecretString::from),
            name,
            tls,
            max_connections,
            min_connections,
            acquire_timeout,
        })
    }

    /// Returns the password, if one was configured.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(ExposeSecret::expose_secret)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Thin wrapper over a key lookup so tests can inject variables.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get a variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn parse_opt<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse::<T>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
            })
            .transpose()
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        Ok(self.parse_opt(key)?.unwrap_or(default))
    }
}
