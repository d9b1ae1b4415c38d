//! Ledger core: accounts, audit entries, and the funds-transfer engine.
//!
//! The engine moves money between two accounts as one atomic unit of work:
//! both balance mutations, both audit entries, and the transfer record commit
//! together or not at all. Account locks are always taken in ascending-id
//! order ([`store::lock_order`]), which rules out circular wait between
//! concurrent transfers over the same pair of accounts.

pub mod error;
pub mod mem;
pub mod models;
pub mod pg;
pub mod store;

pub use error::LedgerError;
pub use mem::MemStore;
pub use models::{Account, Entry, Transfer, TransferParams, TransferResult};
pub use pg::PgStore;
pub use store::{LedgerStore, lock_order};
