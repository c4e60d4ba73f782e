//! History commands - browse, prune, and migrate scan history.

use anyhow::{Context, Result};
use clap::Subcommand;

use nutriscan_protocol::defaults::DEFAULT_PAGE_SIZE;
use nutriscan_protocol::HistoryPage;

use crate::cli::context::AppContext;
use crate::cli::output::{print_json, short_id, table};
use crate::migrate::MigrationWorkflow;
use crate::session::SessionProvider;

#[derive(Debug, clap::Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommand>,

    /// Page number (1-indexed)
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Items per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,
    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// Remove one guest scan by id
    Remove {
        /// Record id, as shown by `nutriscan history`
        id: String,
    },
    /// Delete all guest scans from this device
    Clear,
}

pub async fn run(ctx: &AppContext, args: HistoryArgs) -> Result<()> {
    match args.command {
        Some(HistoryCommand::Remove { id }) => run_remove(ctx, &id).await,
        Some(HistoryCommand::Clear) => run_clear(ctx).await,
        None => run_list(ctx, args.page, args.limit, args.json).await,
    }
}

async fn run_list(ctx: &AppContext, page: u32, limit: u32, json: bool) -> Result<()> {
    let history = ctx.history();
    let data = history
        .history_page(page, limit)
        .await
        .context("Failed to load scan history")?;

    if json {
        return print_json(&data);
    }
    print_history_table(&data);
    Ok(())
}

async fn run_remove(ctx: &AppContext, id: &str) -> Result<()> {
    let removed = ctx
        .store
        .remove(id)
        .await
        .context("Failed to remove guest scan")?;
    if removed {
        println!("Removed {id}");
    } else {
        println!("No guest scan with id {id}");
    }
    Ok(())
}

async fn run_clear(ctx: &AppContext) -> Result<()> {
    let count = ctx.store.scan_count().await;
    ctx.store
        .clear()
        .await
        .context("Failed to clear guest scans")?;
    println!("Cleared {count} guest scan(s)");
    Ok(())
}

#[derive(Debug, clap::Args)]
pub struct MigrateArgs {
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Manual migration trigger. `login` runs the same workflow implicitly.
pub async fn run_migrate(ctx: &AppContext, args: MigrateArgs) -> Result<()> {
    if !ctx.sessions.is_authenticated() {
        anyhow::bail!("Sign in first: guest scans migrate into an account");
    }

    let workflow = MigrationWorkflow::new(ctx.store.clone(), ctx.client.clone());
    let outcome = workflow.run().await;

    if args.json {
        return print_json(&outcome);
    }
    if outcome.success {
        println!("Migrated {} scan(s)", outcome.migrated_count);
    } else {
        println!(
            "Migration failed: {}. Your scans are still on this device.",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

fn print_history_table(data: &HistoryPage) {
    if data.scans.is_empty() {
        println!("No scans yet.");
        return;
    }

    let mut out = table(&["ID", "BARCODE", "PRODUCT", "SCANNED AT", "SOURCE"]);
    for item in &data.scans {
        let name = item
            .product
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "-".to_string());
        out.add_row(vec![
            short_id(&item.id),
            item.barcode.clone(),
            name,
            item.scanned_at.clone(),
            if item.is_local { "device" } else { "account" }.to_string(),
        ]);
    }
    println!("{out}");
    println!(
        "page {}/{} · {} scan(s) total",
        data.page, data.total_pages, data.total_count
    );
}
