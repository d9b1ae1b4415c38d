//! Ledger error taxonomy.
//!
//! Closed set of failure kinds surfaced by every [`super::store::LedgerStore`]
//! implementation. Callers match on variants, never on error strings or
//! driver-specific codes.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    // === Rejected before any store interaction ===
    #[error("source and destination accounts are the same")]
    SameAccount,

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("accounts have different currencies")]
    CurrencyMismatch,

    // === Store-level failures; the unit of work is fully rolled back ===
    #[error("account not found: {0}")]
    AccountNotFound(i64),

    #[error("transfer not found: {0}")]
    TransferNotFound(i64),

    #[error("record violates a uniqueness constraint")]
    Duplicate,

    #[error("account lock not acquired within the deadline")]
    LockTimeout,

    #[error("database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Map a driver error to the taxonomy.
    ///
    /// 55P03 (lock_not_available) is raised when `lock_timeout` expires while
    /// waiting on a contended account row; 23505 is a unique violation.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.code().as_deref() {
                Some("55P03") => return LedgerError::LockTimeout,
                Some("23505") => return LedgerError::Duplicate,
                _ => {}
            }
        }
        LedgerError::Database(err.to_string())
    }

    /// True for failures rejected before the store was touched.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            LedgerError::SameAccount | LedgerError::InvalidAmount | LedgerError::CurrencyMismatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_classification() {
        assert!(LedgerError::SameAccount.is_invalid_argument());
        assert!(LedgerError::InvalidAmount.is_invalid_argument());
        assert!(LedgerError::CurrencyMismatch.is_invalid_argument());
        assert!(!LedgerError::AccountNotFound(7).is_invalid_argument());
        assert!(!LedgerError::LockTimeout.is_invalid_argument());
    }

    #[test]
    fn test_from_sqlx_fallback() {
        let err = LedgerError::from_sqlx(sqlx::Error::PoolClosed);
        assert!(matches!(err, LedgerError::Database(_)));
    }
}
