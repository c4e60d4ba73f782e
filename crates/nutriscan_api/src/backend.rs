//! Seams between the client core and the remote backend.
//!
//! The history facade and the migration workflow talk to these traits
//! rather than to [`ApiClient`](crate::ApiClient) directly, so tests can
//! substitute in-memory backends.

use std::future::Future;

use nutriscan_protocol::{HistoryPage, MigrateScansRequest, MigratedData};

use crate::error::ApiError;

/// Remote source of authenticated scan history.
pub trait HistoryBackend: Send + Sync {
    fn history_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<HistoryPage, ApiError>> + Send;
}

/// Remote sink for guest scan migration.
pub trait MigrationBackend: Send + Sync {
    fn migrate_scans(
        &self,
        request: &MigrateScansRequest,
    ) -> impl Future<Output = Result<MigratedData, ApiError>> + Send;
}

impl<T: HistoryBackend> HistoryBackend for std::sync::Arc<T> {
    fn history_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<HistoryPage, ApiError>> + Send {
        (**self).history_page(page, limit)
    }
}

impl<T: MigrationBackend> MigrationBackend for std::sync::Arc<T> {
    fn migrate_scans(
        &self,
        request: &MigrateScansRequest,
    ) -> impl Future<Output = Result<MigratedData, ApiError>> + Send {
        (**self).migrate_scans(request)
    }
}

impl HistoryBackend for crate::ApiClient {
    fn history_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<HistoryPage, ApiError>> + Send {
        self.user_history(page, limit)
    }
}

impl MigrationBackend for crate::ApiClient {
    fn migrate_scans(
        &self,
        request: &MigrateScansRequest,
    ) -> impl Future<Output = Result<MigratedData, ApiError>> + Send {
        self.migrate_guest_scans(request)
    }
}
