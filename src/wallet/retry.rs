//! Retry Coordinator: bounded re-attempts on transient lock conflicts
//!
//! Wraps the whole lock-acquire-and-commit cycle. Only failures
//! classified as transient (lock wait timeout, deadlock abort) are
//! retried; business-rule and generic storage failures surface
//! immediately and unchanged. Callers never observe a transient
//! conflict directly - they see success, a final error, or
//! `RetriesExhausted` once the attempt limit is spent.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use super::error::WalletError;
use super::model::{OperationKind, Wallet};

/// Seam between the coordinator and the transactional mutator.
/// Production uses [`super::BalanceMutator`]; tests plug in mocks.
#[async_trait]
pub trait BalanceBackend: Send + Sync {
    async fn apply(
        &self,
        wallet_id: Uuid,
        op: OperationKind,
        amount: Decimal,
    ) -> Result<Wallet, WalletError>;
}

pub struct RetryCoordinator {
    backend: Arc<dyn BalanceBackend>,
    max_attempts: u32,
}

impl RetryCoordinator {
    pub fn new(backend: Arc<dyn BalanceBackend>, max_attempts: u32) -> Self {
        Self {
            backend,
            // At least the initial attempt
            max_attempts: max_attempts.max(1),
        }
    }

    /// Run one mutation request to a terminal outcome.
    ///
    /// Retries immediately (no backoff) on transient conflicts, up to
    /// `max_attempts` total attempts including the first.
    pub async fn execute(
        &self,
        wallet_id: Uuid,
        op: OperationKind,
        amount: Decimal,
    ) -> Result<Wallet, WalletError> {
        let mut attempt = 1u32;
        loop {
            match self.backend.apply(wallet_id, op, amount).await {
                Ok(wallet) => return Ok(wallet),
                Err(err) if err.is_transient() => {
                    if attempt >= self.max_attempts {
                        warn!(
                            %wallet_id,
                            attempts = attempt,
                            "Lock conflict persisted past attempt limit"
                        );
                        return Err(WalletError::RetriesExhausted(attempt));
                    }
                    warn!(%wallet_id, attempt, "Transient lock conflict, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Backend that fails with a fixed error kind a set number of
    /// times before succeeding (u32::MAX = never succeeds).
    struct FlakyBackend {
        calls: AtomicU32,
        failures: u32,
        error: fn() -> WalletError,
    }

    impl FlakyBackend {
        fn conflicts(failures: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures,
                error: || WalletError::TransientConflict,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BalanceBackend for FlakyBackend {
        async fn apply(
            &self,
            wallet_id: Uuid,
            _op: OperationKind,
            _amount: Decimal,
        ) -> Result<Wallet, WalletError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err((self.error)())
            } else {
                Ok(Wallet {
                    id: 1,
                    wallet_id,
                    balance: dec!(100.00),
                })
            }
        }
    }

    fn coordinator(backend: Arc<FlakyBackend>) -> RetryCoordinator {
        RetryCoordinator::new(backend, 5)
    }

    #[tokio::test]
    async fn first_attempt_success_makes_one_call() {
        let backend = Arc::new(FlakyBackend::conflicts(0));
        let coord = coordinator(backend.clone());

        let wallet = coord
            .execute(Uuid::new_v4(), OperationKind::Deposit, dec!(1))
            .await
            .unwrap();

        assert_eq!(wallet.balance, dec!(100.00));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn transient_conflicts_are_absorbed() {
        let backend = Arc::new(FlakyBackend::conflicts(3));
        let coord = coordinator(backend.clone());

        let result = coord
            .execute(Uuid::new_v4(), OperationKind::Withdraw, dec!(10))
            .await;

        assert!(result.is_ok());
        assert_eq!(backend.calls(), 4); // 3 conflicts + 1 success
    }

    #[tokio::test]
    async fn persistent_conflict_makes_exactly_max_attempts() {
        let backend = Arc::new(FlakyBackend::conflicts(u32::MAX));
        let coord = coordinator(backend.clone());

        let err = coord
            .execute(Uuid::new_v4(), OperationKind::Deposit, dec!(1))
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::RetriesExhausted(5)));
        assert_eq!(backend.calls(), 5);
    }

    #[tokio::test]
    async fn business_errors_are_never_retried() {
        struct BrokeBackend {
            calls: AtomicU32,
        }

        #[async_trait]
        impl BalanceBackend for BrokeBackend {
            async fn apply(
                &self,
                _wallet_id: Uuid,
                _op: OperationKind,
                _amount: Decimal,
            ) -> Result<Wallet, WalletError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(WalletError::InsufficientFunds)
            }
        }

        let backend = Arc::new(BrokeBackend {
            calls: AtomicU32::new(0),
        });
        let coord = RetryCoordinator::new(backend.clone(), 5);

        let err = coord
            .execute(Uuid::new_v4(), OperationKind::Withdraw, dec!(500))
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::InsufficientFunds));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn storage_errors_fail_immediately() {
        struct DownBackend {
            calls: AtomicU32,
        }

        #[async_trait]
        impl BalanceBackend for DownBackend {
            async fn apply(
                &self,
                _wallet_id: Uuid,
                _op: OperationKind,
                _amount: Decimal,
            ) -> Result<Wallet, WalletError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(WalletError::Storage(sqlx::Error::PoolTimedOut))
            }
        }

        let backend = Arc::new(DownBackend {
            calls: AtomicU32::new(0),
        });
        let coord = RetryCoordinator::new(backend.clone(), 5);

        let err = coord
            .execute(Uuid::new_v4(), OperationKind::Deposit, dec!(1))
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::Storage(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn attempt_limit_is_clamped_to_one() {
        let backend = Arc::new(FlakyBackend::conflicts(u32::MAX));
        let coord = RetryCoordinator::new(backend.clone(), 0);

        let err = coord
            .execute(Uuid::new_v4(), OperationKind::Deposit, dec!(1))
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::RetriesExhausted(1)));
        assert_eq!(backend.calls(), 1);
    }
}
