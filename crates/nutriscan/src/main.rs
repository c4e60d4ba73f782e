//! NutriScan CLI entry point.

use anyhow::Result;
use clap::Parser;

use nutriscan::cli::{self, AppContext, Cli};
use nutriscan_logging::{init_logging, LogConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogConfig {
        app_name: "nutriscan",
        verbose: cli.verbose,
    })?;

    let ctx = AppContext::from_env()?;
    cli::run(cli, ctx).await
}
