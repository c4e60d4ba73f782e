//! Scan history types, local and remote.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::product::Product;

/// A guest scan persisted on-device. The product is denormalized into the
/// record so history stays readable without any server round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalScanRecord {
    pub id: String,
    pub barcode: String,
    pub product_snapshot: Product,
    /// ISO-8601 timestamp from the client clock.
    pub scanned_at: String,
}

impl LocalScanRecord {
    /// Build a record for a freshly scanned product with a device-unique id
    /// and the current client time.
    pub fn new(product: Product) -> Self {
        Self {
            id: format!("local_{}", Uuid::new_v4()),
            barcode: product.barcode.clone(),
            product_snapshot: product,
            scanned_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Project this record into the unified history view.
    pub fn to_history_item(&self) -> ScanHistoryItem {
        ScanHistoryItem {
            id: self.id.clone(),
            barcode: self.barcode.clone(),
            product: Some(self.product_snapshot.clone()),
            scanned_at: self.scanned_at.clone(),
            is_local: true,
        }
    }
}

/// One entry in the unified history view, regardless of provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanHistoryItem {
    pub id: String,
    pub barcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    pub scanned_at: String,
    /// True for guest scans that only exist on-device.
    #[serde(default)]
    pub is_local: bool,
}

/// One page of history, in the backend's wire shape. Guest pages are
/// computed locally into the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub scans: Vec<ScanHistoryItem>,
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

/// One scan in a migration batch, derived 1:1 from a [`LocalScanRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrateScanEntry {
    pub barcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub result_snapshot: Product,
    pub scanned_at: String,
}

impl From<&LocalScanRecord> for MigrateScanEntry {
    fn from(record: &LocalScanRecord) -> Self {
        Self {
            barcode: record.barcode.clone(),
            product_id: Some(record.product_snapshot.id.clone()),
            result_snapshot: record.product_snapshot.clone(),
            scanned_at: record.scanned_at.clone(),
        }
    }
}

/// Request body for `POST /user/history/migrate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrateScansRequest {
    pub scans: Vec<MigrateScanEntry>,
}

impl MigrateScansRequest {
    pub fn from_records(records: &[LocalScanRecord]) -> Self {
        Self {
            scans: records.iter().map(MigrateScanEntry::from).collect(),
        }
    }
}

/// Payload of a successful migration response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigratedData {
    pub migrated_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "prod_9".into(),
            barcode: "737628064502".into(),
            name: "Rice Noodles".into(),
            ..Default::default()
        }
    }

    #[test]
    fn local_record_ids_are_unique_and_prefixed() {
        let a = LocalScanRecord::new(sample_product());
        let b = LocalScanRecord::new(sample_product());
        assert!(a.id.starts_with("local_"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.barcode, "737628064502");
    }

    #[test]
    fn history_item_projection_marks_local() {
        let record = LocalScanRecord::new(sample_product());
        let item = record.to_history_item();
        assert!(item.is_local);
        assert_eq!(item.id, record.id);
        assert_eq!(item.product.as_ref().unwrap().name, "Rice Noodles");
    }

    #[test]
    fn migrate_entry_uses_snake_case_wire_fields() {
        let record = LocalScanRecord::new(sample_product());
        let request = MigrateScansRequest::from_records(std::slice::from_ref(&record));
        let json = serde_json::to_value(&request).unwrap();
        let entry = &json["scans"][0];
        assert_eq!(entry["barcode"], "737628064502");
        assert_eq!(entry["product_id"], "prod_9");
        assert_eq!(entry["result_snapshot"]["name"], "Rice Noodles");
        assert!(entry["scanned_at"].is_string());
    }

    #[test]
    fn history_page_parses_backend_shape() {
        let raw = r#"{
            "scans": [
                {"id": "s1", "barcode": "123", "scanned_at": "2025-06-01T10:00:00Z"}
            ],
            "page": 1,
            "total_pages": 4,
            "total_count": 61
        }"#;
        let page: HistoryPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.scans.len(), 1);
        assert!(!page.scans[0].is_local);
        assert!(page.scans[0].product.is_none());
    }
}
