//! History facade behavior across guest and authenticated modes.

use std::sync::Arc;

use tempfile::TempDir;

use nutriscan::history::ScanHistory;
use nutriscan::session::{AuthUser, FileSessionProvider, Session, SessionProvider};
use nutriscan_protocol::ScanHistoryItem;
use nutriscan_store::ScanStore;
use nutriscan_test_utils::{sample_product, MockHistoryBackend};

fn guest_provider(dir: &TempDir) -> Arc<FileSessionProvider> {
    Arc::new(FileSessionProvider::open(dir.path().join("session.json")))
}

fn sign_in(provider: &FileSessionProvider, user: &str) {
    provider
        .sign_in(Session {
            access_token: format!("token-{user}"),
            refresh_token: None,
            user: AuthUser {
                id: user.to_string(),
                email: None,
            },
            expires_at: None,
        })
        .expect("sign in");
}

fn remote_item(n: u32) -> ScanHistoryItem {
    ScanHistoryItem {
        id: format!("srv_{n}"),
        barcode: format!("99900000{n:04}"),
        product: None,
        scanned_at: "2025-05-01T08:00:00Z".to_string(),
        is_local: false,
    }
}

#[tokio::test]
async fn guest_pagination_covers_partial_last_page() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ScanStore::new(dir.path().join("guest_scans.json")));
    for n in 1..=45 {
        store.save_scan(sample_product(n)).await.unwrap();
    }

    let remote = MockHistoryBackend::failing("remote must not be called for guests");
    let history = ScanHistory::new(guest_provider(&dir), store, remote);

    let page1 = history.history_page(1, 20).await.unwrap();
    assert_eq!(page1.scans.len(), 20);
    assert_eq!(page1.total_pages, 3);
    assert_eq!(page1.total_count, 45);
    assert!(page1.scans.iter().all(|item| item.is_local));

    let page3 = history.history_page(3, 20).await.unwrap();
    assert_eq!(page3.scans.len(), 5);
    assert_eq!(page3.page, 3);
}

#[tokio::test]
async fn empty_guest_history_reports_one_page() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ScanStore::new(dir.path().join("guest_scans.json")));
    let remote = MockHistoryBackend::with_items(Vec::new());
    let history = ScanHistory::new(guest_provider(&dir), store, remote);

    let page = history.history_page(1, 20).await.unwrap();
    assert!(page.scans.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn guest_page_far_past_the_end_is_empty_not_a_panic() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ScanStore::new(dir.path().join("guest_scans.json")));
    store.save_scan(sample_product(1)).await.unwrap();

    let remote = MockHistoryBackend::failing("remote must not be called for guests");
    let history = ScanHistory::new(guest_provider(&dir), store, remote);

    let page = history.history_page(u32::MAX, 20).await.unwrap();
    assert!(page.scans.is_empty());
    assert_eq!(page.total_count, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn authenticated_mode_delegates_to_remote_only() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ScanStore::new(dir.path().join("guest_scans.json")));
    // A leftover guest scan must not leak into the remote view.
    store.save_scan(sample_product(1)).await.unwrap();

    let provider = guest_provider(&dir);
    sign_in(&provider, "u1");

    let remote = MockHistoryBackend::with_items((1..=3).map(remote_item).collect());
    let history = ScanHistory::new(provider, store, remote);

    let page = history.history_page(1, 20).await.unwrap();
    assert_eq!(page.total_count, 3);
    assert_eq!(page.scans.len(), 3);
    assert!(page.scans.iter().all(|item| !item.is_local));
}

#[tokio::test]
async fn guest_mode_never_calls_remote() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ScanStore::new(dir.path().join("guest_scans.json")));
    store.save_scan(sample_product(1)).await.unwrap();

    let remote = Arc::new(MockHistoryBackend::failing("boom"));
    let history = ScanHistory::new(guest_provider(&dir), store, Arc::clone(&remote));

    history.history_page(1, 10).await.unwrap();
    assert_eq!(history.scan_count().await.unwrap(), 1);
    assert_eq!(remote.call_count(), 0);
}

#[tokio::test]
async fn mode_switch_drops_cached_page() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ScanStore::new(dir.path().join("guest_scans.json")));
    store.save_scan(sample_product(1)).await.unwrap();

    let provider = guest_provider(&dir);
    let remote = MockHistoryBackend::with_items((1..=2).map(remote_item).collect());
    let history = ScanHistory::new(provider.clone(), Arc::clone(&store), remote);

    let guest_page = history.history_page(1, 20).await.unwrap();
    assert_eq!(guest_page.total_count, 1);
    // Same request again is served from cache.
    assert_eq!(history.history_page(1, 20).await.unwrap(), guest_page);

    sign_in(&provider, "u1");
    let auth_page = history.history_page(1, 20).await.unwrap();
    assert_eq!(auth_page.total_count, 2);
    assert!(auth_page.scans.iter().all(|item| !item.is_local));
}

#[tokio::test]
async fn remote_failures_propagate_for_retry() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ScanStore::new(dir.path().join("guest_scans.json")));

    let provider = guest_provider(&dir);
    sign_in(&provider, "u1");

    let remote = MockHistoryBackend::failing("connection reset");
    let history = ScanHistory::new(provider, store, remote);

    let err = history.history_page(1, 20).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn scan_count_follows_auth_mode() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ScanStore::new(dir.path().join("guest_scans.json")));
    for n in 1..=4 {
        store.save_scan(sample_product(n)).await.unwrap();
    }

    let provider = guest_provider(&dir);
    let remote = MockHistoryBackend::with_items((1..=9).map(remote_item).collect());
    let history = ScanHistory::new(provider.clone(), store, remote);

    assert_eq!(history.scan_count().await.unwrap(), 4);

    sign_in(&provider, "u1");
    assert_eq!(history.scan_count().await.unwrap(), 9);
}
