//! Wallet error taxonomy and storage-failure classification

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// PostgreSQL SQLSTATEs that signal a transient lock conflict:
/// retrying the whole transaction is expected to succeed.
const LOCK_NOT_AVAILABLE: &str = "55P03";
const DEADLOCK_DETECTED: &str = "40P01";
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid wallet id: {0}")]
    InvalidWalletId(String),

    #[error("Invalid operation type: {0}")]
    InvalidOperation(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Wallet not found: {0}")]
    NotFound(Uuid),

    #[error("Insufficient funds for withdrawal")]
    InsufficientFunds,

    /// Lock wait timeout or deadlock abort. Never surfaced to callers;
    /// the retry coordinator either absorbs it or converts it into
    /// [`WalletError::RetriesExhausted`].
    #[error("Transient lock conflict")]
    TransientConflict,

    #[error("Operation abandoned after {0} attempts")]
    RetriesExhausted(u32),

    #[error("Storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

impl WalletError {
    /// True for failures the retry coordinator may re-attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, WalletError::TransientConflict)
    }
}

/// Classify a raw storage failure: lock conflicts become
/// [`WalletError::TransientConflict`], everything else is final.
impl From<sqlx::Error> for WalletError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error()
            && let Some(code) = db_err.code()
            && is_transient_sqlstate(code.as_ref())
        {
            return WalletError::TransientConflict;
        }
        WalletError::Storage(err)
    }
}

fn is_transient_sqlstate(code: &str) -> bool {
    matches!(
        code,
        LOCK_NOT_AVAILABLE | DEADLOCK_DETECTED | SERIALIZATION_FAILURE
    )
}
