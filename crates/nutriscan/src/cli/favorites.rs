//! Favorites commands.

use anyhow::{Context, Result};
use clap::Subcommand;

use nutriscan_protocol::defaults::DEFAULT_PAGE_SIZE;

use crate::cli::context::AppContext;
use crate::cli::output::{dash, print_json, short_id, table};

#[derive(Debug, clap::Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List favorites
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
        #[arg(long)]
        json: bool,
    },
    /// Add a product to favorites
    Add { product_id: String },
    /// Remove a product from favorites
    Remove { product_id: String },
    /// Check whether a product is favorited
    Check { product_id: String },
}

pub async fn run(ctx: &AppContext, args: FavoritesArgs) -> Result<()> {
    match args.command {
        FavoritesCommand::List { page, limit, json } => {
            let data = ctx
                .client
                .favorites(page, limit)
                .await
                .context("Failed to load favorites")?;
            if json {
                return print_json(&data);
            }
            if data.favorites.is_empty() {
                println!("No favorites yet.");
                return Ok(());
            }
            let mut out = table(&["ID", "PRODUCT", "ADDED"]);
            for favorite in &data.favorites {
                let name = favorite
                    .product
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| favorite.product_id.clone());
                out.add_row(vec![
                    short_id(&favorite.id),
                    name,
                    dash(&favorite.created_at),
                ]);
            }
            println!("{out}");
            println!(
                "page {}/{} · {} favorite(s) total",
                data.page, data.total_pages, data.total_count
            );
            Ok(())
        }
        FavoritesCommand::Add { product_id } => {
            let favorite = ctx
                .client
                .add_favorite(&product_id)
                .await
                .context("Failed to add favorite")?;
            println!("Added {} to favorites", favorite.product_id);
            Ok(())
        }
        FavoritesCommand::Remove { product_id } => {
            ctx.client
                .remove_favorite(&product_id)
                .await
                .context("Failed to remove favorite")?;
            println!("Removed {product_id} from favorites");
            Ok(())
        }
        FavoritesCommand::Check { product_id } => {
            let status = ctx
                .client
                .favorite_status(&product_id)
                .await
                .context("Failed to check favorite status")?;
            println!(
                "{product_id}: {}",
                if status.is_favorite {
                    "favorited"
                } else {
                    "not favorited"
                }
            );
            Ok(())
        }
    }
}
