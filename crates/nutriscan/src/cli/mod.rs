//! CLI for the NutriScan client core.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `run` function. Human output goes through `output`; every listing also
//! supports `--json` for scripting.

pub mod admin;
pub mod auth;
pub mod context;
pub mod correction;
pub mod favorites;
pub mod history;
pub mod output;
pub mod prefs;
pub mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use context::AppContext;

#[derive(Debug, Parser)]
#[command(name = "nutriscan", version, about = "Barcode product lookup with local-first scan history")]
pub struct Cli {
    /// Mirror the full log filter to the console
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a scanned code and record it in history
    Scan(scan::ScanArgs),
    /// Browse scan history (local when signed out, remote when signed in)
    History(history::HistoryArgs),
    /// Install a session token and migrate pending guest scans
    Login(auth::LoginArgs),
    /// Drop the current session
    Logout,
    /// Show the signed-in user
    Whoami(auth::WhoamiArgs),
    /// Upload pending guest scans to the signed-in account
    Migrate(history::MigrateArgs),
    /// Manage favorite products
    Favorites(favorites::FavoritesArgs),
    /// Show or update dietary preferences
    Prefs(prefs::PrefsArgs),
    /// Submit a product data correction
    Correct(correction::CorrectArgs),
    /// Review corrections and platform stats (admin)
    Admin(admin::AdminArgs),
}

/// Dispatch a parsed command against a built context.
pub async fn run(cli: Cli, ctx: AppContext) -> Result<()> {
    match cli.command {
        Command::Scan(args) => scan::run(&ctx, args).await,
        Command::History(args) => history::run(&ctx, args).await,
        Command::Login(args) => auth::run_login(&ctx, args).await,
        Command::Logout => auth::run_logout(&ctx),
        Command::Whoami(args) => auth::run_whoami(&ctx, args).await,
        Command::Migrate(args) => history::run_migrate(&ctx, args).await,
        Command::Favorites(args) => favorites::run(&ctx, args).await,
        Command::Prefs(args) => prefs::run(&ctx, args).await,
        Command::Correct(args) => correction::run(&ctx, args).await,
        Command::Admin(args) => admin::run(&ctx, args).await,
    }
}
