//! Canonical default values shared across the client core.

/// Maximum number of guest scans kept on-device. Insertions past the cap
/// evict the oldest records.
pub const MAX_GUEST_SCANS: usize = 100;

/// Default page size for history and favorites listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fallback API base URL when no configuration is present.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Fallback API version segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Request timeout applied to every remote call.
pub const API_TIMEOUT_SECS: u64 = 10;
