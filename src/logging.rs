//! Tracing setup: rolling log file plus colored stdout.
//!
//! The returned guard owns the non-blocking writer thread; hold it
//! for the lifetime of the process.

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let appender = match config.rotation.as_str() {
        "hourly" => rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => rolling::daily(&config.log_dir, &config.log_file),
        _ => rolling::never(&config.log_dir, &config.log_file),
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // RUST_LOG wins; otherwise the YAML level, with the crate's own
    // spans silenced when tracing is disabled.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.enable_tracing {
            EnvFilter::new(&config.log_level)
        } else {
            EnvFilter::new(format!("{},walletd=off", config.log_level))
        }
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        // JSON goes to the file only; targets kept for structured queries
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(writer)
            .with_ansi(false);
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}
