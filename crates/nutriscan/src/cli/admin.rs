//! Admin commands - correction review and platform stats.

use anyhow::{Context, Result};
use clap::Subcommand;

use nutriscan_protocol::defaults::DEFAULT_PAGE_SIZE;
use nutriscan_protocol::{Correction, CorrectionStatus};

use crate::cli::context::AppContext;
use crate::cli::output::{dash, print_json, short_id, table};

#[derive(Debug, clap::Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List submitted corrections
    Corrections {
        /// Filter by status: pending, approved, rejected
        #[arg(long, value_parser = parse_status)]
        status: Option<CorrectionStatus>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
        #[arg(long)]
        json: bool,
    },
    /// Show one correction in full
    Correction {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Approve a correction
    Approve { id: String },
    /// Reject a correction
    Reject { id: String },
    /// Show platform statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
}

fn parse_status(raw: &str) -> Result<CorrectionStatus, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pending" => Ok(CorrectionStatus::Pending),
        "approved" => Ok(CorrectionStatus::Approved),
        "rejected" => Ok(CorrectionStatus::Rejected),
        other => Err(format!(
            "invalid status '{other}' (expected pending, approved, or rejected)"
        )),
    }
}

pub async fn run(ctx: &AppContext, args: AdminArgs) -> Result<()> {
    match args.command {
        AdminCommand::Corrections {
            status,
            page,
            limit,
            json,
        } => {
            let corrections = ctx
                .client
                .admin_corrections(status, page, limit)
                .await
                .context("Failed to load corrections")?;
            if json {
                return print_json(&corrections);
            }
            print_corrections_table(&corrections);
            Ok(())
        }
        AdminCommand::Correction { id, json } => {
            let correction = ctx
                .client
                .admin_correction(&id)
                .await
                .context("Failed to load correction")?;
            if json {
                return print_json(&correction);
            }
            print_correction(&correction);
            Ok(())
        }
        AdminCommand::Approve { id } => {
            let correction = ctx
                .client
                .approve_correction(&id)
                .await
                .context("Failed to approve correction")?;
            println!("Correction {} is now {}", correction.id, correction.status);
            Ok(())
        }
        AdminCommand::Reject { id } => {
            let correction = ctx
                .client
                .reject_correction(&id)
                .await
                .context("Failed to reject correction")?;
            println!("Correction {} is now {}", correction.id, correction.status);
            Ok(())
        }
        AdminCommand::Stats { json } => {
            let stats = ctx
                .client
                .admin_stats()
                .await
                .context("Failed to load stats")?;
            if json {
                return print_json(&stats);
            }
            println!("products:            {}", stats.total_products);
            println!("scans:               {}", stats.total_scans);
            println!("users:               {}", stats.total_users);
            println!("pending corrections: {}", stats.pending_corrections);
            Ok(())
        }
    }
}

fn print_corrections_table(corrections: &[Correction]) {
    if corrections.is_empty() {
        println!("No corrections.");
        return;
    }
    let mut out = table(&["ID", "PRODUCT", "FIELD", "STATUS", "SUBMITTED"]);
    for correction in corrections {
        out.add_row(vec![
            short_id(&correction.id),
            short_id(&correction.product_id),
            correction.field_name.clone(),
            correction.status.to_string(),
            dash(&correction.created_at),
        ]);
    }
    println!("{out}");
}

fn print_correction(correction: &Correction) {
    println!("correction {}", correction.id);
    println!("  product: {}", correction.product_id);
    println!("  field:   {}", correction.field_name);
    println!("  old:     {}", correction.old_value);
    println!("  new:     {}", correction.new_value);
    println!("  status:  {}", correction.status);
    if let Some(photo) = &correction.photo_url {
        println!("  photo:   {photo}");
    }
}
