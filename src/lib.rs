//! walletd - Wallet Balance Service
//!
//! A PostgreSQL-backed wallet service built around one protocol:
//! locate a wallet row, lock it, validate the operation, mutate the
//! balance, commit, and retry on transient lock conflicts.
//!
//! # Modules
//!
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing setup (rolling file + stdout)
//! - [`db`] - PostgreSQL connection pool and schema bootstrap
//! - [`wallet`] - the core: locator, mutator, retry coordinator
//! - [`gateway`] - axum HTTP API

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod wallet;

// Convenient re-exports at crate root
pub use config::{AppConfig, GatewayConfig, RetryConfig};
pub use db::Database;
pub use wallet::{
    BalanceBackend, BalanceMutator, OperationKind, RetryCoordinator, Wallet, WalletError,
    WalletLocator,
};
