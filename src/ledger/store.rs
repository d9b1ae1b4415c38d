//! The ledger store capability.
//!
//! All persistence is reached through [`LedgerStore`], so the gateway and the
//! tests can run against PostgreSQL ([`super::pg::PgStore`]) or the in-memory
//! store ([`super::mem::MemStore`]) without caring which is behind the trait.

use async_trait::async_trait;

use super::error::LedgerError;
use super::models::{Account, Entry, Transfer, TransferParams, TransferResult};

/// Deterministic acquisition order for a pair of account ids.
///
/// Every operation that touches two accounts must take them in this order,
/// ascending by id, regardless of which side is debited. A global total order
/// on account acquisition means no cycle can form in the wait-for graph, so
/// two transfers over the same pair in opposite directions cannot deadlock.
#[inline]
pub fn lock_order(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Create an account with balance zero.
    async fn create_account(&self, owner: &str, currency: &str) -> Result<Account, LedgerError>;

    async fn get_account(&self, id: i64) -> Result<Account, LedgerError>;

    /// List one owner's accounts, ordered by id.
    async fn list_accounts(
        &self,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, LedgerError>;

    async fn delete_account(&self, id: i64) -> Result<(), LedgerError>;

    /// Balance mutator: atomically add `delta` to the account's balance and
    /// return the new state. The read-modify-write is one step in the store,
    /// never a read followed by a write from here, so concurrent mutators on
    /// the same account cannot lose updates.
    async fn add_account_balance(&self, id: i64, delta: i64) -> Result<Account, LedgerError>;

    /// Balance mutator plus its audit entry in one unit of work. Either the
    /// balance change and the entry both commit, or neither does; a balance
    /// change without its entry must never be observable.
    async fn adjust_balance(&self, id: i64, delta: i64)
    -> Result<(Account, Entry), LedgerError>;

    /// Entry recorder: append one immutable audit entry. No business
    /// validation beyond the account existing.
    async fn create_entry(&self, account_id: i64, amount: i64) -> Result<Entry, LedgerError>;

    /// List an account's entries, newest first.
    async fn list_entries(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, LedgerError>;

    async fn get_transfer(&self, id: i64) -> Result<Transfer, LedgerError>;

    /// List transfers touching one account, either side, newest first.
    async fn list_transfers(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, LedgerError>;

    /// Transfer engine: move `amount` between two accounts as one atomic
    /// unit of work. Debits the source, credits the destination, records a
    /// debit and a credit entry plus the transfer row. On any failure nothing
    /// is applied. Locks are taken in [`lock_order`].
    async fn transfer(&self, params: TransferParams) -> Result<TransferResult, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_order_ascending() {
        assert_eq!(lock_order(1, 2), (1, 2));
        assert_eq!(lock_order(2, 1), (1, 2));
        assert_eq!(lock_order(7, 7), (7, 7));
        assert_eq!(lock_order(-3, 5), (-3, 5));
    }

    #[test]
    fn test_lock_order_direction_independent() {
        // Both directions over the same pair agree on the acquisition order.
        assert_eq!(lock_order(10, 42), lock_order(42, 10));
    }
}
