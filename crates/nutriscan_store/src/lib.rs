//! On-device guest scan history.
//!
//! Guest (unauthenticated) scans live in a single JSON blob on disk, capped
//! at [`nutriscan_protocol::defaults::MAX_GUEST_SCANS`] records. One blob
//! rather than per-record files keeps truncation atomic: every mutation is
//! a read-modify-write of the whole list followed by a temp-file rename.
//! O(n) per write is fine with n bounded at 100.
//!
//! Error policy is deliberately asymmetric: reads fail open (missing or
//! corrupt data yields an empty history, logged at warn) because history is
//! non-critical, while writes fail closed because silently dropping a
//! user's scan is worse than surfacing an error.

mod scan_store;

pub use scan_store::{ScanStore, StoreError};
