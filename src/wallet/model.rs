//! Wallet row model and operation vocabulary

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::dec;
use uuid::Uuid;

use super::error::WalletError;

/// Largest representable balance/amount: NUMERIC(10, 2), so 8 integer
/// digits and 2 fractional ones.
pub const MAX_AMOUNT: Decimal = dec!(99999999.99);

/// A wallet row as stored in `wallets_tb`.
///
/// `id` is a storage-local surrogate; all external lookups go through
/// `wallet_id`. `balance` is exact fixed-point, scale 2.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Wallet {
    pub id: i64,
    pub wallet_id: Uuid,
    pub balance: Decimal,
}

/// Balance operation kind, as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Credit: balance increases, no upper bound enforced here
    Deposit,
    /// Debit: balance decreases, rejected if it would go negative
    Withdraw,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "DEPOSIT",
            OperationKind::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(OperationKind::Deposit),
            "WITHDRAW" => Ok(OperationKind::Withdraw),
            other => Err(WalletError::InvalidOperation(other.to_string())),
        }
    }
}

/// Validate an operation amount before any transaction starts.
///
/// Accepted: non-negative, at most 2 fractional digits, within the
/// NUMERIC(10, 2) range. Zero is a valid (degenerate) amount; the
/// operation still runs and commits a no-op.
pub fn validate_amount(amount: Decimal) -> Result<(), WalletError> {
    if amount.is_sign_negative() {
        return Err(WalletError::InvalidAmount(amount));
    }
    // Trailing zeros do not count as extra precision ("1.500" is fine)
    if amount.normalize().scale() > 2 {
        return Err(WalletError::InvalidAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(WalletError::InvalidAmount(amount));
    }
    Ok(())
}
