//! Fixtures for store-level tests.

use tempfile::TempDir;

use nutriscan_protocol::Product;
use nutriscan_store::ScanStore;

/// A deterministic product with a stable id/barcode derived from `n`.
pub fn sample_product(n: u32) -> Product {
    Product {
        id: format!("prod_{n}"),
        barcode: format!("400638133{n:04}"),
        name: format!("Sample Product {n}"),
        brand: Some("Acme Foods".into()),
        allergens: Some(vec!["Milk".into(), "Soy".into()]),
        health_score: Some(62.0),
        ..Default::default()
    }
}

/// A scan store backed by a fresh temp directory. Keep the [`TempDir`]
/// alive for the duration of the test or the backing file disappears.
pub fn temp_store() -> (TempDir, ScanStore) {
    let dir = TempDir::new().expect("create temp dir");
    let store = ScanStore::new(dir.path().join("guest_scans.json"));
    (dir, store)
}
