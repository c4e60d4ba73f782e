//! Shared wiring for CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};

use nutriscan_api::{ApiClient, TokenSource};
use nutriscan_store::ScanStore;

use crate::config::ApiConfig;
use crate::history::ScanHistory;
use crate::session::FileSessionProvider;

/// Everything a command needs: the session boundary, the on-device store,
/// and one API client wired to pull its bearer token from the session.
pub struct AppContext {
    pub config: ApiConfig,
    pub sessions: Arc<FileSessionProvider>,
    pub store: Arc<ScanStore>,
    pub client: Arc<ApiClient>,
}

impl AppContext {
    /// Build from the environment and the default NutriScan home.
    pub fn from_env() -> Result<Self> {
        let config = ApiConfig::from_env();
        let sessions = Arc::new(FileSessionProvider::open_default());
        let store = Arc::new(ScanStore::open_default());
        let tokens: Arc<dyn TokenSource> = sessions.clone();
        let client = Arc::new(
            ApiClient::new(config.base_url(), tokens).context("Failed to build API client")?,
        );
        Ok(Self {
            config,
            sessions,
            store,
            client,
        })
    }

    /// History facade over the shared store and client.
    pub fn history(&self) -> ScanHistory<Arc<ApiClient>> {
        let sessions: Arc<dyn crate::session::SessionProvider> = self.sessions.clone();
        ScanHistory::new(sessions, Arc::clone(&self.store), Arc::clone(&self.client))
    }
}
