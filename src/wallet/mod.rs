//! Wallet core: the balance-mutation protocol
//!
//! Layering, leaves first:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────┐
//! │ Locator  │───▶│ Mutator  │───▶│ RetryCoord.  │
//! │ (lookup) │    │ (one tx) │    │ (bounded)    │
//! └──────────┘    └──────────┘    └──────────────┘
//! ```
//!
//! The locator resolves and (optionally) locks a wallet row, the
//! mutator runs one credit/debit inside one transaction, and the
//! retry coordinator absorbs transient lock conflicts around the
//! whole cycle.

pub mod error;
pub mod locator;
pub mod model;
pub mod mutator;
pub mod retry;

pub use error::WalletError;
pub use locator::WalletLocator;
pub use model::{MAX_AMOUNT, OperationKind, Wallet, validate_amount};
pub use mutator::BalanceMutator;
pub use retry::{BalanceBackend, RetryCoordinator};
