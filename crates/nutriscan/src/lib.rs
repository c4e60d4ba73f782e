//! NutriScan client core.
//!
//! Ties the on-device guest scan store, the backend REST client, and the
//! session provider together into the three core workflows:
//!
//! - [`history::ScanHistory`] — one paginated history view for both guests
//!   and signed-in users.
//! - [`migrate::MigrationWorkflow`] — one-shot transfer of guest scans into
//!   a freshly authenticated account.
//! - [`session`] — the injected session boundary (no global auth state).

pub mod cli;
pub mod config;
pub mod history;
pub mod migrate;
pub mod preferences;
pub mod session;

pub use config::ApiConfig;
pub use history::ScanHistory;
pub use migrate::{MigrationOutcome, MigrationWorkflow};
pub use session::{AuthUser, FileSessionProvider, Session, SessionError, SessionProvider};
