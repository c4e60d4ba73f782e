//! Correct command - submit a product data correction.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::context::AppContext;
use crate::cli::output::print_json;

#[derive(Debug, clap::Args)]
pub struct CorrectArgs {
    /// Product the correction applies to
    pub product_id: String,
    /// Field being corrected, e.g. "name" or "ingredients_raw"
    #[arg(long)]
    pub field: String,
    /// Current (wrong) value
    #[arg(long)]
    pub old: String,
    /// Proposed value
    #[arg(long)]
    pub new: String,
    /// Photo of the label backing the correction
    #[arg(long)]
    pub photo: Option<PathBuf>,
    /// Print the created correction as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: CorrectArgs) -> Result<()> {
    let correction = ctx
        .client
        .submit_correction(
            &args.product_id,
            &args.field,
            &args.old,
            &args.new,
            args.photo.as_deref(),
        )
        .await
        .context("Failed to submit correction")?;

    if args.json {
        return print_json(&correction);
    }
    println!(
        "Correction {} submitted ({}): {} -> {}",
        correction.id, correction.status, args.old, args.new
    );
    Ok(())
}
