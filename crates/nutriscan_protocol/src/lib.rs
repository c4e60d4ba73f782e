//! Wire and domain types for the NutriScan client core.
//!
//! These types are shared by the local guest-scan store, the REST client,
//! and the CLI. All wire-facing types use serde with snake_case field names
//! matching the backend contract.

pub mod defaults;
pub mod envelope;
pub mod history;
pub mod paths;
pub mod product;
pub mod scan;
pub mod user;

pub use envelope::ApiResponse;
pub use history::{
    HistoryPage, LocalScanRecord, MigrateScanEntry, MigrateScansRequest, MigratedData,
    ScanHistoryItem,
};
pub use product::{NutritionFacts, NutritionInfo, Product};
pub use scan::{CodeKind, ScanRequest};
pub use user::{
    AdminStats, Correction, CorrectionStatus, Favorite, FavoriteStatus, FavoritesPage,
    UpdatePreferencesRequest, UserProfile,
};
