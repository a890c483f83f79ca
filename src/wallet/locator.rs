//! Account Locator: identifier validation and wallet row lookup
//!
//! Two lookup modes with different concurrency semantics:
//! - [`WalletLocator::get`] is a plain read, never blocked by writers.
//! - [`WalletLocator::get_for_update`] takes `FOR UPDATE` inside the
//!   caller's transaction; the row lock is held until that transaction
//!   commits or rolls back.
//!
//! No retries here. Lock conflicts are the mutator/coordinator's concern.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::error::WalletError;
use super::model::Wallet;

const SELECT_WALLET: &str = "SELECT id, wallet_id, balance FROM wallets_tb WHERE wallet_id = $1";

const SELECT_WALLET_FOR_UPDATE: &str =
    "SELECT id, wallet_id, balance FROM wallets_tb WHERE wallet_id = $1 FOR UPDATE";

pub struct WalletLocator {
    pool: PgPool,
}

impl WalletLocator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parse a raw identifier into a wallet id.
    ///
    /// Fails with `InvalidWalletId` on malformed input without touching
    /// storage.
    pub fn parse_id(raw: &str) -> Result<Uuid, WalletError> {
        Uuid::parse_str(raw).map_err(|_| WalletError::InvalidWalletId(raw.to_string()))
    }

    /// Plain read: no lock, may observe pre- or post-mutation state of
    /// an in-flight operation.
    pub async fn get(&self, wallet_id: Uuid) -> Result<Wallet, WalletError> {
        sqlx::query_as::<_, Wallet>(SELECT_WALLET)
            .bind(wallet_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(WalletError::NotFound(wallet_id))
    }

    /// Locking read: acquires an exclusive row lock held until the
    /// enclosing transaction ends. Used by the mutator only.
    pub async fn get_for_update(
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: Uuid,
    ) -> Result<Wallet, WalletError> {
        sqlx::query_as::<_, Wallet>(SELECT_WALLET_FOR_UPDATE)
            .bind(wallet_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(WalletError::NotFound(wallet_id))
    }

    /// List all wallets, oldest first
    pub async fn list(&self) -> Result<Vec<Wallet>, WalletError> {
        let wallets =
            sqlx::query_as::<_, Wallet>("SELECT id, wallet_id, balance FROM wallets_tb ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(wallets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_uuid_parses() {
        let id = WalletLocator::parse_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn malformed_identifier_fails_before_storage() {
        for raw in ["not-a-uuid", "", "3fa85f64", "3fa85f64-5717-4562-b3fc-2c963f66afa6x"] {
            let err = WalletLocator::parse_id(raw).unwrap_err();
            assert!(matches!(err, WalletError::InvalidWalletId(_)), "{raw}");
        }
    }
}
