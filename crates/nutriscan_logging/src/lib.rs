//! Shared logging utilities for NutriScan binaries.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use nutriscan_protocol::paths::default_logs_dir;

const DEFAULT_LOG_FILTER: &str = "nutriscan=info,nutriscan_store=info,nutriscan_api=info";

/// Logging configuration for a NutriScan binary.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Mirror the full filter to the console instead of warnings only.
    pub verbose: bool,
}

/// Initialize tracing with a daily-rolling log file and stderr output.
///
/// The file layer always carries the full filter (`RUST_LOG` overrides the
/// default); the console stays at `warn` unless `verbose` is set so CLI
/// output is not drowned in event noise.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let log_dir = ensure_logs_dir().context("Failed to ensure log directory")?;
    let file_writer =
        tracing_appender::rolling::daily(log_dir, format!("{}.log", config.app_name));

    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_filter = if config.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    Ok(())
}

/// Ensure the logs directory exists and return it.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = default_logs_dir();
    std::fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}
