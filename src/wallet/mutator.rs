//! Balance Mutator: one credit/debit per call, inside one transaction
//!
//! The whole read-modify-write runs under an exclusive row lock taken
//! by the locking read. Dropping the transaction on any error path
//! rolls it back, so a failed call never leaves a partial update.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::error::WalletError;
use super::locator::WalletLocator;
use super::model::{OperationKind, Wallet, validate_amount};
use super::retry::BalanceBackend;

const UPDATE_BALANCE: &str =
    "UPDATE wallets_tb SET balance = $1 WHERE wallet_id = $2 RETURNING id, wallet_id, balance";

pub struct BalanceMutator {
    pool: PgPool,
    lock_timeout_ms: u64,
}

impl BalanceMutator {
    pub fn new(pool: PgPool, lock_timeout_ms: u64) -> Self {
        Self {
            pool,
            lock_timeout_ms,
        }
    }

    /// Apply a single operation. No retries: a lock conflict or any
    /// other storage failure surfaces to the caller already classified
    /// (`TransientConflict` vs `Storage`).
    pub async fn apply_once(
        &self,
        wallet_id: Uuid,
        op: OperationKind,
        amount: Decimal,
    ) -> Result<Wallet, WalletError> {
        validate_amount(amount)?;

        let mut tx = self.pool.begin().await?;

        // Bound the lock wait so contention surfaces as SQLSTATE 55P03
        // instead of blocking forever. SET LOCAL scopes it to this
        // transaction only.
        sqlx::query(&format!(
            "SET LOCAL lock_timeout = '{}ms'",
            self.lock_timeout_ms
        ))
        .execute(&mut *tx)
        .await?;

        let wallet = WalletLocator::get_for_update(&mut tx, wallet_id).await?;

        let new_balance = match op {
            OperationKind::Deposit => wallet.balance + amount,
            OperationKind::Withdraw => {
                if amount > wallet.balance {
                    // tx dropped here -> rollback, row untouched
                    return Err(WalletError::InsufficientFunds);
                }
                wallet.balance - amount
            }
        };

        let updated = sqlx::query_as::<_, Wallet>(UPDATE_BALANCE)
            .bind(new_balance)
            .bind(wallet_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            %wallet_id,
            op = %op,
            %amount,
            balance = %updated.balance,
            "Balance mutation committed"
        );

        Ok(updated)
    }
}

#[async_trait]
impl BalanceBackend for BalanceMutator {
    async fn apply(
        &self,
        wallet_id: Uuid,
        op: OperationKind,
        amount: Decimal,
    ) -> Result<Wallet, WalletError> {
        self.apply_once(wallet_id, op, amount).await
    }
}
