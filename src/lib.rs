//! minibank - a small ledger service
//!
//! Accounts hold balances in a single currency; transfers move funds between
//! two accounts while recording an auditable trail of entries. The heart of
//! the crate is the funds-transfer engine in [`ledger`]: an all-or-nothing
//! unit of work that locks both accounts in ascending-id order, so concurrent
//! transfers over the same pair can never deadlock.
//!
//! # Modules
//!
//! - [`ledger`] - domain types, error taxonomy, the store capability, and the
//!   Postgres / in-memory implementations of the transfer engine
//! - [`db`] - PostgreSQL connection pool and schema bootstrap
//! - [`gateway`] - axum HTTP API
//! - [`user_auth`] - registration, login, JWT verification
//! - [`config`] / [`logging`] - YAML configuration and tracing setup

pub mod config;
pub mod db;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod user_auth;

// Convenient re-exports at crate root
pub use ledger::error::LedgerError;
pub use ledger::models::{Account, Entry, Transfer, TransferParams, TransferResult};
pub use ledger::store::{LedgerStore, lock_order};
