//! Account repository for customers and administrators.
//!
//! Both account kinds live in tables with identical columns, so one
//! repository serves both and the caller picks the table.

use sqlx::PgPool;

use shopdesk_core::Email;

use super::{RepositoryError, WriteOutcome};
use crate::models::Account;

/// Which account table a statement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountTable {
    /// `signup`: accounts created by customers.
    Customer,
    /// `admin_account`: accounts created with the CLI.
    Admin,
}

impl AccountTable {
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Customer => "signup",
            Self::Admin => "admin_account",
        }
    }
}

/// An account together with its stored password hash.
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    account: Account,
    password_hash: String,
}

/// Fields for a new account row.
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    pub name: &'a str,
    pub email: &'a Email,
    pub phone: &'a str,
    pub password_hash: &'a str,
}

/// Repository for account rows.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
    table: AccountTable,
}

impl<'a> AccountRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, table: AccountTable) -> Self {
        Self { pool, table }
    }

    #[must_use]
    pub const fn table(&self) -> AccountTable {
        self.table
    }

    /// Insert an account and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or phone is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, account: NewAccount<'_>) -> Result<WriteOutcome, RepositoryError> {
        let sql = format!(
            "INSERT INTO {} (name, email, phone, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING id",
            self.table.table_name()
        );

        let id: i32 = sqlx::query_scalar(&sql)
            .bind(account.name)
            .bind(account.email)
            .bind(account.phone)
            .bind(account.password_hash)
            .fetch_one(self.pool)
            .await
            .map_err(RepositoryError::from_write)?;

        Ok(WriteOutcome::inserted(id))
    }

    /// Look up an account and its password hash by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_with_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        let sql = format!(
            "SELECT id, name, email, phone, created_at, password_hash \
             FROM {} WHERE email = $1",
            self.table.table_name()
        );

        let row = sqlx::query_as::<_, CredentialRow>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(|r| (r.account, r.password_hash)))
    }
}
