//! Authentication service.
//!
//! Registers accounts and checks email/password sign-ins against either the
//! customer or the administrator table. Passwords are stored as salted
//! Argon2id hashes; the plaintext never reaches the database.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};
use sqlx::PgPool;

use shopdesk_core::{AccountId, Email};

use crate::db::RepositoryError;
use crate::db::accounts::{AccountRepository, AccountTable, NewAccount};
use crate::models::Account;

/// One-way password hashing.
pub trait CredentialHasher: Send + Sync {
    /// Produce a self-describing digest (salt and parameters included).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a password against a digest produced by [`hash`](Self::hash).
    ///
    /// A malformed digest never verifies.
    fn verify(&self, password: &str, digest: &str) -> bool;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Signup submission after presence checks.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'r> {
    pub name: &'r str,
    pub email: &'r str,
    pub phone: &'r str,
    pub password: &'r str,
    pub confirm_password: &'r str,
}

/// Authentication service bound to one account table.
pub struct AuthService<'a> {
    accounts: AccountRepository<'a>,
    hasher: &'a dyn CredentialHasher,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, table: AccountTable, hasher: &'a dyn CredentialHasher) -> Self {
        Self {
            accounts: AccountRepository::new(pool, table),
            hasher,
        }
    }

    /// Register a new account.
    ///
    /// The confirmation is compared by exact string equality and is not
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email or phone is taken.
    pub async fn register(&self, registration: Registration<'_>) -> Result<AccountId, AuthError> {
        check_confirmation(registration.password, registration.confirm_password)?;
        let email = Email::parse(registration.email)?;
        let password_hash = self.hasher.hash(registration.password)?;

        let outcome = self
            .accounts
            .create(NewAccount {
                name: registration.name,
                email: &email,
                phone: registration.phone,
                password_hash: &password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(
            table = self.accounts.table().table_name(),
            email = %email,
            "Account registered"
        );

        outcome
            .insert_id
            .map(AccountId::new)
            .ok_or(AuthError::Repository(RepositoryError::NotFound))
    }

    /// Sign in with email and password.
    ///
    /// An unknown email, a malformed email and a wrong password all produce
    /// the same error. An unknown email still pays for one Argon2
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (account, password_hash) = self.accounts.find_with_hash(&email).await?.unzip();

        if !password_matches(self.hasher, password, password_hash.as_deref()) {
            return Err(AuthError::InvalidCredentials);
        }

        account.ok_or(AuthError::InvalidCredentials)
    }
}

/// Well-formed Argon2id digest with default parameters that no password
/// matches. Verified against when the email is unknown so both failure
/// paths cost one hash.
const DECOY_DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn password_matches(hasher: &dyn CredentialHasher, password: &str, digest: Option<&str>) -> bool {
    match digest {
        Some(digest) => hasher.verify(password, digest),
        None => {
            let _ = hasher.verify(password, DECOY_DIGEST);
            false
        }
    }
}

/// Exact string comparison of password and confirmation.
fn check_confirmation(password: &str, confirm_password: &str) -> Result<(), AuthError> {
    if password == confirm_password {
        Ok(())
    } else {
        Err(AuthError::PasswordMismatch)
    }
}
