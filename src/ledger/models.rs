//! Domain types for the ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Currencies accepted for new accounts.
pub const CURRENCIES: [&str; 3] = ["USD", "EUR", "CAD"];

pub fn is_supported_currency(currency: &str) -> bool {
    CURRENCIES.contains(&currency)
}

/// A balance-holding account. The balance is in minor currency units and may
/// go negative: the engine performs no overdraft check, a non-negative policy
/// belongs to the caller's precondition stage. The currency never changes
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// One signed balance change applied to exactly one account. Positive is a
/// credit, negative a debit. Append-only audit trail, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// One completed movement of funds between two distinct accounts.
/// The amount is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Input to the transfer engine.
#[derive(Debug, Clone, Copy)]
pub struct TransferParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    /// Amount to move, in minor units. Must be positive.
    pub amount: i64,
}

/// Everything created or mutated by one successful transfer. Returning the
/// updated account states lets a caller display new balances without a
/// second query.
#[derive(Debug, Clone, Serialize)]
pub struct TransferResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}
