use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;

use nutriscan_protocol::defaults::MAX_GUEST_SCANS;
use nutriscan_protocol::paths::default_guest_scans_path;
use nutriscan_protocol::{LocalScanRecord, Product};

/// Errors surfaced by store mutations. Reads never return these; they fail
/// open to an empty history instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("guest scan storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode guest scans: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable store for guest scan records.
///
/// Sole owner of the backing file; nothing else writes to it. Mutations are
/// serialized by an internal lock so two scans firing back-to-back cannot
/// interleave their read-modify-write sequences and lose a record.
pub struct ScanStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ScanStore {
    /// Open a store backed by the given file. The file is created lazily on
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Open the store at the default location under the NutriScan home.
    pub fn open_default() -> Self {
        Self::new(default_guest_scans_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a scan of `product`, evicting the oldest records past the
    /// retention cap. Returns the created record.
    pub async fn save_scan(&self, product: Product) -> Result<LocalScanRecord, StoreError> {
        let _guard = self.write_lock.lock().await;

        let record = LocalScanRecord::new(product);
        let mut records = self.read_fail_open().await;
        records.insert(0, record.clone());
        records.truncate(MAX_GUEST_SCANS);
        self.write_records(&records).await?;

        tracing::debug!(id = %record.id, barcode = %record.barcode, "saved guest scan");
        Ok(record)
    }

    /// All stored scans, most recent first. Missing or corrupt data yields
    /// an empty list.
    pub async fn scans(&self) -> Vec<LocalScanRecord> {
        self.read_fail_open().await
    }

    /// Whether any guest scans are pending. Never errors.
    pub async fn has_scans(&self) -> bool {
        !self.read_fail_open().await.is_empty()
    }

    /// Number of stored guest scans. Never errors.
    pub async fn scan_count(&self) -> usize {
        self.read_fail_open().await.len()
    }

    /// Delete the entire collection. Used after a confirmed migration or an
    /// explicit storage reset.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Remove the record with the given id, leaving all others in order.
    /// Returns whether a record was actually removed.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_fail_open().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_records(&records).await?;
        Ok(true)
    }

    async fn read_fail_open(&self) -> Vec<LocalScanRecord> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read guest scans");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "guest scan data corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    async fn write_records(&self, records: &[LocalScanRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let payload = serde_json::to_vec(records)?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &payload).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn product(n: u32) -> Product {
        Product {
            id: format!("prod_{n}"),
            barcode: format!("100000000{n:04}"),
            name: format!("Product {n}"),
            brand: Some("TestBrand".into()),
            ..Default::default()
        }
    }

    fn store_in(dir: &TempDir) -> ScanStore {
        ScanStore::new(dir.path().join("guest_scans.json"))
    }

    #[tokio::test]
    async fn save_then_read_roundtrips_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let saved = store.save_scan(product(1)).await.unwrap();
        let scans = store.scans().await;

        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].id, saved.id);
        assert_eq!(scans[0].product_snapshot, product(1));
        assert_eq!(scans[0].barcode, "1000000000001");
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.scans().await.is_empty());
        assert!(!store.has_scans().await);
        assert_eq!(store.scan_count().await, 0);
    }

    #[tokio::test]
    async fn retention_cap_evicts_oldest() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for n in 1..=105 {
            store.save_scan(product(n)).await.unwrap();
        }

        let scans = store.scans().await;
        assert_eq!(scans.len(), MAX_GUEST_SCANS);
        // Most recent first: #105 at the head, #6 at the tail.
        assert_eq!(scans[0].product_snapshot.id, "prod_105");
        assert_eq!(scans[99].product_snapshot.id, "prod_6");
        assert!(!scans.iter().any(|s| s.product_snapshot.id == "prod_5"));
    }

    #[tokio::test]
    async fn ordering_is_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for n in 1..=3 {
            store.save_scan(product(n)).await.unwrap();
        }

        let ids: Vec<_> = store
            .scans()
            .await
            .into_iter()
            .map(|s| s.product_snapshot.id)
            .collect();
        assert_eq!(ids, vec!["prod_3", "prod_2", "prod_1"]);
    }

    #[tokio::test]
    async fn corrupt_blob_fails_open_and_recovers_on_save() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        tokio::fs::write(store.path(), b"{not json").await.unwrap();
        assert!(store.scans().await.is_empty());
        assert_eq!(store.scan_count().await, 0);

        store.save_scan(product(7)).await.unwrap();
        let scans = store.scans().await;
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].product_snapshot.id, "prod_7");
    }

    #[tokio::test]
    async fn remove_targets_exactly_one_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut saved = Vec::new();
        for n in 1..=4 {
            saved.push(store.save_scan(product(n)).await.unwrap());
        }

        assert!(store.remove(&saved[1].id).await.unwrap());
        let ids: Vec<_> = store.scans().await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![
            saved[3].id.clone(),
            saved[2].id.clone(),
            saved[0].id.clone(),
        ]);

        assert!(!store.remove("local_nonexistent").await.unwrap());
        assert_eq!(store.scan_count().await, 3);
    }

    #[tokio::test]
    async fn clear_deletes_everything_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save_scan(product(1)).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.scans().await.is_empty());

        // Clearing an already-empty store is not an error.
        store.clear().await.unwrap();
    }
}
