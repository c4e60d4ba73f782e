//! Guest scan migration.
//!
//! Runs once per sign-in/sign-up: pending guest scans are uploaded as one
//! batch and the local store is cleared only after the server confirms
//! receipt. Local data is deleted if and only if the server reported
//! success, which makes delivery at-least-once; a retry after an ambiguous
//! failure may duplicate scans server-side, and that is the accepted
//! tradeoff. The workflow never returns an error — auth must succeed even
//! when migration does not — so the result is a structured outcome the
//! caller can log and move on from.

use std::sync::Arc;

use serde::Serialize;

use nutriscan_api::MigrationBackend;
use nutriscan_protocol::MigrateScansRequest;
use nutriscan_store::ScanStore;

/// Terminal state of one migration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationOutcome {
    pub success: bool,
    pub migrated_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MigrationOutcome {
    fn done(migrated_count: u64) -> Self {
        Self {
            success: true,
            migrated_count,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            migrated_count: 0,
            error: Some(error.into()),
        }
    }
}

/// Moves guest-accumulated history into the authenticated account.
pub struct MigrationWorkflow<B: MigrationBackend> {
    store: Arc<ScanStore>,
    backend: B,
}

impl<B: MigrationBackend> MigrationWorkflow<B> {
    pub fn new(store: Arc<ScanStore>, backend: B) -> Self {
        Self { store, backend }
    }

    /// Run the migration to completion.
    pub async fn run(&self) -> MigrationOutcome {
        if !self.store.has_scans().await {
            tracing::debug!("no guest scans to migrate");
            return MigrationOutcome::done(0);
        }

        let records = self.store.scans().await;
        if records.is_empty() {
            return MigrationOutcome::done(0);
        }

        let request = MigrateScansRequest::from_records(&records);
        tracing::info!(count = records.len(), "uploading guest scans");

        let data = match self.backend.migrate_scans(&request).await {
            Ok(data) => data,
            Err(err) => {
                // Scans stay on-device; the user keeps their history and a
                // later sign-in retries the upload.
                tracing::warn!(error = %err, "guest scan migration failed");
                return MigrationOutcome::failed(err.to_string());
            }
        };

        if let Err(err) = self.store.clear().await {
            tracing::warn!(error = %err, "migrated scans could not be cleared locally");
            return MigrationOutcome::failed(err.to_string());
        }

        tracing::info!(migrated = data.migrated_count, "guest scan migration complete");
        MigrationOutcome::done(data.migrated_count)
    }
}
