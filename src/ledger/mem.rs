//! In-memory ledger store.
//!
//! Mirrors the Postgres engine semantics over per-account async mutexes: the
//! same ascending-id acquisition order, all mutation deferred until both
//! guards are held and every check has passed. Used as the engine's test
//! bench, where the concurrency properties can be exercised without a
//! running database.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;

use super::error::LedgerError;
use super::models::{Account, Entry, Transfer, TransferParams, TransferResult};
use super::store::{LedgerStore, lock_order};

/// One lockable account cell. The `Arc` keeps an account alive for a transfer
/// already holding it even if the registry entry is removed concurrently.
type AccountCell = Arc<Mutex<Account>>;

#[derive(Default)]
pub struct MemStore {
    accounts: DashMap<i64, AccountCell>,
    entries: Mutex<Vec<Entry>>,
    transfers: Mutex<Vec<Transfer>>,
    // Serializes the duplicate scan and the insert in create_account, the
    // in-memory stand-in for the DB unique (owner, currency) constraint.
    create_lock: Mutex<()>,
    account_seq: AtomicI64,
    entry_seq: AtomicI64,
    transfer_seq: AtomicI64,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn account_cell(&self, id: i64) -> Result<AccountCell, LedgerError> {
        self.accounts
            .get(&id)
            .map(|cell| cell.clone())
            .ok_or(LedgerError::AccountNotFound(id))
    }
}

#[async_trait]
impl LedgerStore for MemStore {
    async fn create_account(&self, owner: &str, currency: &str) -> Result<Account, LedgerError> {
        // Held across scan and insert so two concurrent creates for the same
        // (owner, currency) cannot both pass the duplicate check.
        let _create_guard = self.create_lock.lock().await;

        // Snapshot the cells first; locking while iterating would hold a map
        // shard guard across an await point.
        let cells: Vec<AccountCell> = self.accounts.iter().map(|c| c.value().clone()).collect();
        for cell in cells {
            let existing = cell.lock().await;
            if existing.owner == owner && existing.currency == currency {
                return Err(LedgerError::Duplicate);
            }
        }

        let account = Account {
            id: self.account_seq.fetch_add(1, Ordering::SeqCst) + 1,
            owner: owner.to_string(),
            balance: 0,
            currency: currency.to_string(),
            created_at: Utc::now(),
        };
        self.accounts
            .insert(account.id, Arc::new(Mutex::new(account.clone())));
        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, LedgerError> {
        let cell = self.account_cell(id)?;
        let account = cell.lock().await;
        Ok(account.clone())
    }

    async fn list_accounts(
        &self,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, LedgerError> {
        let cells: Vec<AccountCell> = self.accounts.iter().map(|c| c.value().clone()).collect();
        let mut accounts = Vec::new();
        for cell in cells {
            let account = cell.lock().await;
            if account.owner == owner {
                accounts.push(account.clone());
            }
        }
        accounts.sort_by_key(|a| a.id);
        Ok(accounts
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn delete_account(&self, id: i64) -> Result<(), LedgerError> {
        self.accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(LedgerError::AccountNotFound(id))
    }

    async fn add_account_balance(&self, id: i64, delta: i64) -> Result<Account, LedgerError> {
        let cell = self.account_cell(id)?;
        let mut account = cell.lock().await;
        account.balance += delta;
        Ok(account.clone())
    }

    async fn adjust_balance(&self, id: i64, delta: i64) -> Result<(Account, Entry), LedgerError> {
        let cell = self.account_cell(id)?;
        let mut account = cell.lock().await;
        // Guard held across both the balance change and the entry append, so
        // no reader sees one without the other.
        account.balance += delta;
        let entry = Entry {
            id: self.entry_seq.fetch_add(1, Ordering::SeqCst) + 1,
            account_id: id,
            amount: delta,
            created_at: Utc::now(),
        };
        self.entries.lock().await.push(entry.clone());
        Ok((account.clone(), entry))
    }

    async fn create_entry(&self, account_id: i64, amount: i64) -> Result<Entry, LedgerError> {
        // Referential existence only, like the foreign key in the DB schema.
        self.account_cell(account_id)?;
        let entry = Entry {
            id: self.entry_seq.fetch_add(1, Ordering::SeqCst) + 1,
            account_id,
            amount,
            created_at: Utc::now(),
        };
        self.entries.lock().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_entries(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, LedgerError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| e.account_id == account_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn get_transfer(&self, id: i64) -> Result<Transfer, LedgerError> {
        let transfers = self.transfers.lock().await;
        transfers
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(LedgerError::TransferNotFound(id))
    }

    async fn list_transfers(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, LedgerError> {
        let transfers = self.transfers.lock().await;
        Ok(transfers
            .iter()
            .rev()
            .filter(|t| t.from_account_id == account_id || t.to_account_id == account_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn transfer(&self, params: TransferParams) -> Result<TransferResult, LedgerError> {
        let TransferParams {
            from_account_id: from,
            to_account_id: to,
            amount,
        } = params;

        if from == to {
            return Err(LedgerError::SameAccount);
        }
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }

        // Resolve both cells before locking; a missing account fails the
        // whole operation with nothing applied.
        let (lo, hi) = lock_order(from, to);
        let lo_cell = self.account_cell(lo)?;
        let hi_cell = self.account_cell(hi)?;

        // Ascending-id acquisition, same rule as the Postgres engine.
        let mut lo_guard = lo_cell.lock().await;
        let mut hi_guard = hi_cell.lock().await;

        let (from_guard, to_guard) = if lo == from {
            (&mut lo_guard, &mut hi_guard)
        } else {
            (&mut hi_guard, &mut lo_guard)
        };

        // Both locks held and all checks passed: apply everything at once.
        from_guard.balance -= amount;
        to_guard.balance += amount;

        let now = Utc::now();
        let from_entry = Entry {
            id: self.entry_seq.fetch_add(1, Ordering::SeqCst) + 1,
            account_id: from,
            amount: -amount,
            created_at: now,
        };
        let to_entry = Entry {
            id: self.entry_seq.fetch_add(1, Ordering::SeqCst) + 1,
            account_id: to,
            amount,
            created_at: now,
        };
        let transfer = Transfer {
            id: self.transfer_seq.fetch_add(1, Ordering::SeqCst) + 1,
            from_account_id: from,
            to_account_id: to,
            amount,
            created_at: now,
        };

        {
            let mut entries = self.entries.lock().await;
            entries.push(from_entry.clone());
            entries.push(to_entry.clone());
        }
        self.transfers.lock().await.push(transfer.clone());

        Ok(TransferResult {
            transfer,
            from_account: from_guard.clone(),
            to_account: to_guard.clone(),
            from_entry,
            to_entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_account() {
        let store = MemStore::new();
        let account = store.create_account("alice", "USD").await.unwrap();
        assert_eq!(account.balance, 0);
        assert_eq!(account.currency, "USD");

        let fetched = store.get_account(account.id).await.unwrap();
        assert_eq!(fetched, account);
    }

    #[tokio::test]
    async fn test_duplicate_owner_currency_rejected() {
        let store = MemStore::new();
        store.create_account("alice", "USD").await.unwrap();
        let err = store.create_account("alice", "USD").await.unwrap_err();
        assert_eq!(err, LedgerError::Duplicate);
        // A different currency for the same owner is fine.
        store.create_account("alice", "EUR").await.unwrap();
    }

    #[tokio::test]
    async fn test_add_account_balance() {
        let store = MemStore::new();
        let account = store.create_account("bob", "USD").await.unwrap();

        let updated = store.add_account_balance(account.id, 250).await.unwrap();
        assert_eq!(updated.balance, 250);
        let updated = store.add_account_balance(account.id, -300).await.unwrap();
        assert_eq!(updated.balance, -50);

        let err = store.add_account_balance(9999, 1).await.unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound(9999));
    }

    #[tokio::test]
    async fn test_delete_account() {
        let store = MemStore::new();
        let account = store.create_account("carol", "CAD").await.unwrap();
        store.delete_account(account.id).await.unwrap();
        let err = store.get_account(account.id).await.unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound(account.id));
    }

    #[tokio::test]
    async fn test_list_accounts_paged() {
        let store = MemStore::new();
        store.create_account("dave", "USD").await.unwrap();
        store.create_account("dave", "EUR").await.unwrap();
        store.create_account("dave", "CAD").await.unwrap();
        store.create_account("erin", "USD").await.unwrap();

        let page = store.list_accounts("dave", 2, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert!(page[0].id < page[1].id);

        let rest = store.list_accounts("dave", 2, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_yield_one_account() {
        let store = Arc::new(MemStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.create_account("grace", "USD").await },
            ));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert_eq!(err, LedgerError::Duplicate),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.list_accounts("grace", 100, 0).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_adjust_balance_records_entry() {
        let store = MemStore::new();
        let account = store.create_account("heidi", "USD").await.unwrap();

        let (updated, entry) = store.adjust_balance(account.id, 500).await.unwrap();
        assert_eq!(updated.balance, 500);
        assert_eq!(entry.account_id, account.id);
        assert_eq!(entry.amount, 500);

        let (updated, entry) = store.adjust_balance(account.id, -200).await.unwrap();
        assert_eq!(updated.balance, 300);
        assert_eq!(entry.amount, -200);

        let entries = store.list_entries(account.id, 10, 0).await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_adjust_balance_missing_account_leaves_no_entry() {
        let store = MemStore::new();
        let err = store.adjust_balance(404, 100).await.unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound(404));
        assert!(store.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_entry_recorder_requires_account() {
        let store = MemStore::new();
        let err = store.create_entry(42, 10).await.unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound(42));

        let account = store.create_account("frank", "USD").await.unwrap();
        let entry = store.create_entry(account.id, -75).await.unwrap();
        assert_eq!(entry.amount, -75);
        let listed = store.list_entries(account.id, 10, 0).await.unwrap();
        assert_eq!(listed, vec![entry]);
    }
}
