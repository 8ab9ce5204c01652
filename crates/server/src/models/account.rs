//! Customer and administrator accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{AccountId, Email};

/// An account row, without its password hash.
///
/// Customer (`signup`) and administrator (`admin_account`) rows share this
/// shape; which table a value came from is tracked by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}
