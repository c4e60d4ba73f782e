//! Scripted in-memory implementations of the remote backend seams.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use nutriscan_api::{ApiError, HistoryBackend, MigrationBackend};
use nutriscan_protocol::{HistoryPage, MigrateScansRequest, MigratedData, ScanHistoryItem};

/// Remote history that serves pages from an in-memory item list, applying
/// the same pagination math a real backend would.
pub struct MockHistoryBackend {
    items: Vec<ScanHistoryItem>,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl MockHistoryBackend {
    pub fn with_items(items: Vec<ScanHistoryItem>) -> Self {
        Self {
            items,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A backend whose every call fails like a dropped connection.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            fail_with: Some(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HistoryBackend for MockHistoryBackend {
    fn history_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<HistoryPage, ApiError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.fail_with {
            Some(message) => Err(ApiError::Status {
                status: 503,
                message: message.clone(),
            }),
            None => {
                let limit = limit.max(1);
                let start = (page.max(1) as usize - 1).saturating_mul(limit as usize);
                let scans: Vec<_> = self
                    .items
                    .iter()
                    .skip(start)
                    .take(limit as usize)
                    .cloned()
                    .collect();
                let total_count = self.items.len() as u64;
                let total_pages = (total_count.div_ceil(limit as u64)).max(1) as u32;
                Ok(HistoryPage {
                    scans,
                    page,
                    total_pages,
                    total_count,
                })
            }
        };
        std::future::ready(result)
    }
}

/// Scripted outcome for a migration upload.
pub enum MigrationScript {
    /// Server accepts the batch and reports the count it stored.
    Accept,
    /// Transport-level failure before any response.
    NetworkError(String),
    /// Envelope-level rejection (`success = false`).
    Rejected(String),
}

/// Remote migration endpoint that records every request it receives.
pub struct MockMigrationBackend {
    script: MigrationScript,
    received: Mutex<Vec<MigrateScansRequest>>,
}

impl MockMigrationBackend {
    pub fn new(script: MigrationScript) -> Self {
        Self {
            script,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(MigrationScript::Accept)
    }

    /// Requests seen so far, in arrival order.
    pub fn received(&self) -> Vec<MigrateScansRequest> {
        self.received.lock().expect("mock lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().expect("mock lock poisoned").len()
    }
}

impl MigrationBackend for MockMigrationBackend {
    fn migrate_scans(
        &self,
        request: &MigrateScansRequest,
    ) -> impl Future<Output = Result<MigratedData, ApiError>> + Send {
        self.received
            .lock()
            .expect("mock lock poisoned")
            .push(request.clone());
        let result = match &self.script {
            MigrationScript::Accept => Ok(MigratedData {
                migrated_count: request.scans.len() as u64,
            }),
            MigrationScript::NetworkError(message) => Err(ApiError::Status {
                status: 504,
                message: message.clone(),
            }),
            MigrationScript::Rejected(message) => Err(ApiError::Api(message.clone())),
        };
        std::future::ready(result)
    }
}
