//! Preferences commands - allergies and diets.

use anyhow::{Context, Result};
use clap::Subcommand;

use nutriscan_protocol::UpdatePreferencesRequest;

use crate::cli::context::AppContext;
use crate::cli::output::print_json;
use crate::preferences::{custom_entries, COMMON_ALLERGENS, COMMON_DIETS};

#[derive(Debug, clap::Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Show stored preferences
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Replace allergies and/or diets
    Set {
        /// Comma-separated allergies, e.g. "Milk,Gluten"
        #[arg(long, value_delimiter = ',')]
        allergies: Option<Vec<String>>,
        /// Comma-separated diets, e.g. "Vegan,Low-sodium"
        #[arg(long, value_delimiter = ',')]
        diets: Option<Vec<String>>,
    },
    /// List the built-in allergen and diet catalogs
    Catalog,
}

pub async fn run(ctx: &AppContext, args: PrefsArgs) -> Result<()> {
    match args.command {
        PrefsCommand::Show { json } => {
            let profile = ctx.client.me().await.context("Failed to load profile")?;
            if json {
                return print_json(&profile);
            }
            println!("allergies: {}", join_or_none(&profile.allergies));
            println!("diets:     {}", join_or_none(&profile.diets));
            Ok(())
        }
        PrefsCommand::Set { allergies, diets } => {
            if allergies.is_none() && diets.is_none() {
                anyhow::bail!("Nothing to set: pass --allergies and/or --diets");
            }

            if let Some(allergies) = &allergies {
                for custom in custom_entries(allergies, &COMMON_ALLERGENS) {
                    println!("note: '{custom}' is not a common allergen, saving as custom");
                }
            }
            if let Some(diets) = &diets {
                for custom in custom_entries(diets, &COMMON_DIETS) {
                    println!("note: '{custom}' is not a common diet, saving as custom");
                }
            }

            let request = UpdatePreferencesRequest {
                allergies: allergies.map(trim_all),
                diets: diets.map(trim_all),
            };
            let profile = ctx
                .client
                .update_preferences(&request)
                .await
                .context("Failed to update preferences")?;
            println!("allergies: {}", join_or_none(&profile.allergies));
            println!("diets:     {}", join_or_none(&profile.diets));
            Ok(())
        }
        PrefsCommand::Catalog => {
            println!("allergens: {}", COMMON_ALLERGENS.join(", "));
            println!("diets:     {}", COMMON_DIETS.join(", "));
            Ok(())
        }
    }
}

fn trim_all(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}
