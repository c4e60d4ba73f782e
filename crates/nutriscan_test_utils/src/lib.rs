//! NutriScan test utilities.
//!
//! In-memory stand-ins for the remote backend plus fixtures for the
//! on-device store. The real backend is a plain REST contract, so the
//! mocks script envelope-level outcomes (pages, migration counts, network
//! failures) without any HTTP in the loop.

pub mod backends;
pub mod fixtures;

pub use backends::{MigrationScript, MockHistoryBackend, MockMigrationBackend};
pub use fixtures::{sample_product, temp_store};
