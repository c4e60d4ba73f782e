//! Scan command - look up a code and record it.
//!
//! Guests get the scan persisted on-device; signed-in users rely on the
//! backend recording it server-side, and additionally get an allergen
//! check against their stored preferences.

use anyhow::{Context, Result};

use nutriscan_protocol::{CodeKind, Product, ScanRequest};

use crate::cli::context::AppContext;
use crate::cli::output::print_json;
use crate::preferences::allergen_warnings;
use crate::session::SessionProvider;

#[derive(Debug, clap::Args)]
pub struct ScanArgs {
    /// The scanned code payload
    pub code: String,
    /// Treat the code as a QR payload instead of a barcode
    #[arg(long)]
    pub qr: bool,
    /// Country-of-sale hint passed to the resolver
    #[arg(long)]
    pub country: Option<String>,
    /// Print the raw product JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: ScanArgs) -> Result<()> {
    let request = ScanRequest {
        code: args.code.clone(),
        kind: if args.qr {
            CodeKind::Qr
        } else {
            CodeKind::Barcode
        },
        country: args.country.clone(),
    };

    let product = ctx
        .client
        .scan_product(&request)
        .await
        .with_context(|| format!("Failed to resolve code {}", args.code))?;

    if ctx.sessions.is_authenticated() {
        warn_on_allergens(ctx, &product).await;
    } else {
        ctx.store
            .save_scan(product.clone())
            .await
            .context("Failed to record guest scan")?;
    }

    if args.json {
        return print_json(&product);
    }
    print_product(&product);
    Ok(())
}

async fn warn_on_allergens(ctx: &AppContext, product: &Product) {
    let profile = match ctx.client.me().await {
        Ok(profile) => profile,
        Err(err) => {
            // Non-critical: the scan itself succeeded.
            tracing::warn!(error = %err, "could not load preferences for allergen check");
            return;
        }
    };
    let allergens = product.allergens.clone().unwrap_or_default();
    for warning in allergen_warnings(&allergens, &profile.allergies) {
        eprintln!("⚠ contains {warning}, which is on your allergy list");
    }
}

fn print_product(product: &Product) {
    println!("{}", product.name);
    if let Some(brand) = &product.brand {
        println!("  brand:     {brand}");
    }
    println!("  barcode:   {}", product.barcode);
    if let Some(category) = &product.category {
        println!("  category:  {category}");
    }
    if let Some(score) = product.health_score {
        println!("  score:     {score:.0}/100");
    }
    if let Some(allergens) = &product.allergens {
        if !allergens.is_empty() {
            println!("  allergens: {}", allergens.join(", "));
        }
    }
    if let Some(nutrition) = &product.nutrition {
        if let Some(kcal) = nutrition.per_100g.energy_kcal {
            println!("  energy:    {kcal:.0} kcal / 100g");
        }
    }
}
