//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::auth::{Argon2Hasher, CredentialHasher};

/// Application state shared across all handlers.
///
/// Built once at startup and cloned into every request via `Arc`. The pool
/// is the only resource handlers share.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    hasher: Argon2Hasher,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                hasher: Argon2Hasher,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Password hasher used for signup and sign-in.
    #[must_use]
    pub fn hasher(&self) -> &dyn CredentialHasher {
        &self.inner.hasher
    }
}
