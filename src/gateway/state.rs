use std::sync::Arc;

use crate::config::RetryConfig;
use crate::db::Database;
use crate::wallet::{BalanceMutator, RetryCoordinator, WalletLocator};

/// Shared gateway state: the storage pool plus the wallet core wired
/// on top of it.
pub struct AppState {
    pub db: Arc<Database>,
    pub locator: WalletLocator,
    pub coordinator: RetryCoordinator,
}

impl AppState {
    pub fn new(db: Arc<Database>, retry: &RetryConfig) -> Self {
        let pool = db.pool().clone();
        let locator = WalletLocator::new(pool.clone());
        let mutator = Arc::new(BalanceMutator::new(pool, retry.lock_timeout_ms));
        let coordinator = RetryCoordinator::new(mutator, retry.max_attempts);

        Self {
            db,
            locator,
            coordinator,
        }
    }
}
