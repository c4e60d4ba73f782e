//! Unified scan history.
//!
//! One paginated interface regardless of auth state: signed-in users get
//! the remote history verbatim, guests get the on-device store with
//! pagination computed locally. Exactly one source feeds any given page —
//! the two are never mixed.

use std::sync::Arc;

use tokio::sync::Mutex;

use nutriscan_api::{ApiError, HistoryBackend};
use nutriscan_protocol::HistoryPage;
use nutriscan_store::ScanStore;

use crate::session::SessionProvider;

struct CachedPage {
    authenticated: bool,
    page: u32,
    limit: u32,
    data: HistoryPage,
}

/// Facade over local and remote scan history.
pub struct ScanHistory<B: HistoryBackend> {
    sessions: Arc<dyn SessionProvider>,
    store: Arc<ScanStore>,
    remote: B,
    // Single-entry cache keyed by auth mode. A page index that was valid as
    // a guest must not be served after sign-in (totals differ), so a mode
    // flip drops the entry.
    cache: Mutex<Option<CachedPage>>,
}

impl<B: HistoryBackend> ScanHistory<B> {
    pub fn new(sessions: Arc<dyn SessionProvider>, store: Arc<ScanStore>, remote: B) -> Self {
        Self {
            sessions,
            store,
            remote,
            cache: Mutex::new(None),
        }
    }

    /// Fetch one page of history. Remote failures propagate for a
    /// UI-level retry; local read failures fail open to an empty page.
    pub async fn history_page(&self, page: u32, limit: u32) -> Result<HistoryPage, ApiError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let authenticated = self.sessions.is_authenticated();

        {
            let mut cache = self.cache.lock().await;
            if let Some(entry) = cache.as_ref() {
                if entry.authenticated == authenticated
                    && entry.page == page
                    && entry.limit == limit
                {
                    return Ok(entry.data.clone());
                }
            }
            // Anything else is stale; a mode flip in particular must not
            // leave a guest page around to be served after sign-in.
            *cache = None;
        }

        let data = if authenticated {
            self.remote.history_page(page, limit).await?
        } else {
            self.local_page(page, limit).await
        };

        *self.cache.lock().await = Some(CachedPage {
            authenticated,
            page,
            limit,
            data: data.clone(),
        });
        Ok(data)
    }

    /// Total number of scans visible to the current mode. Guests never
    /// error; remote failures propagate.
    pub async fn scan_count(&self) -> Result<u64, ApiError> {
        if self.sessions.is_authenticated() {
            Ok(self.remote.history_page(1, 1).await?.total_count)
        } else {
            Ok(self.store.scan_count().await as u64)
        }
    }

    /// Drop any cached page. Call after a save, a removal, or a migration.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    async fn local_page(&self, page: u32, limit: u32) -> HistoryPage {
        let records = self.store.scans().await;
        let total_count = records.len() as u64;
        let total_pages = (total_count.div_ceil(limit as u64)).max(1) as u32;

        let start = (page as usize - 1).saturating_mul(limit as usize);
        let scans = records
            .iter()
            .skip(start)
            .take(limit as usize)
            .map(|record| record.to_history_item())
            .collect();

        HistoryPage {
            scans,
            page,
            total_pages,
            total_count,
        }
    }
}
