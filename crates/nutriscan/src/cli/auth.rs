//! Auth commands - install, inspect, and drop sessions.
//!
//! The identity provider itself is out of scope; `login` takes an access
//! token the provider already issued, validates it against `/user/me`, and
//! installs it. A successful login also kicks off guest scan migration,
//! whose failure is deliberately non-fatal: the login stands either way.

use anyhow::{Context, Result};

use crate::cli::context::AppContext;
use crate::cli::output::print_json;
use crate::migrate::MigrationWorkflow;
use crate::session::{AuthUser, Session, SessionProvider};

#[derive(Debug, clap::Args)]
pub struct LoginArgs {
    /// Access token issued by the auth provider
    #[arg(long, env = "NUTRISCAN_ACCESS_TOKEN", hide_env_values = true)]
    pub token: String,
    /// Refresh token, if the provider issued one
    #[arg(long, hide_env_values = true)]
    pub refresh_token: Option<String>,
}

pub async fn run_login(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    // Install provisionally so the client sends the token, then let
    // /user/me both validate it and tell us who we are.
    ctx.sessions
        .sign_in(Session {
            access_token: args.token.clone(),
            refresh_token: args.refresh_token.clone(),
            user: AuthUser {
                id: String::new(),
                email: None,
            },
            expires_at: None,
        })
        .context("Failed to persist session")?;

    let profile = match ctx.client.me().await {
        Ok(profile) => profile,
        Err(err) => {
            ctx.sessions.sign_out();
            return Err(err).context("Token rejected by backend");
        }
    };

    ctx.sessions
        .sign_in(Session {
            access_token: args.token,
            refresh_token: args.refresh_token,
            user: AuthUser {
                id: profile.id.clone(),
                email: profile.email.clone(),
            },
            expires_at: None,
        })
        .context("Failed to persist session")?;

    println!(
        "Signed in as {}",
        profile.email.as_deref().unwrap_or(&profile.id)
    );

    // Guest history rides along with the new account. Failures only get
    // logged; the scans stay on-device and a later `migrate` retries.
    let workflow = MigrationWorkflow::new(ctx.store.clone(), ctx.client.clone());
    let outcome = workflow.run().await;
    if outcome.success && outcome.migrated_count > 0 {
        tracing::info!(count = outcome.migrated_count, "guest scans migrated on login");
    }

    Ok(())
}

pub fn run_logout(ctx: &AppContext) -> Result<()> {
    ctx.sessions.sign_out();
    println!("Signed out");
    Ok(())
}

#[derive(Debug, clap::Args)]
pub struct WhoamiArgs {
    /// Print the full profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_whoami(ctx: &AppContext, args: WhoamiArgs) -> Result<()> {
    if !ctx.sessions.is_authenticated() {
        println!("Not signed in (guest mode)");
        return Ok(());
    }

    let profile = ctx.client.me().await.context("Failed to load profile")?;
    if args.json {
        return print_json(&profile);
    }
    println!("{}", profile.email.as_deref().unwrap_or(&profile.id));
    if !profile.allergies.is_empty() {
        println!("  allergies: {}", profile.allergies.join(", "));
    }
    if !profile.diets.is_empty() {
        println!("  diets:     {}", profile.diets.join(", "));
    }
    Ok(())
}
