//! HTTP client for the NutriScan backend.
//!
//! One [`ApiClient`] covers the whole consumed REST surface: scanning,
//! authenticated history and migration, favorites, the user profile,
//! corrections, and the admin review endpoints. Auth is injected through
//! the [`TokenSource`] seam so the client itself knows nothing about how
//! sessions are obtained or stored.

mod backend;
mod client;
mod error;
mod token;

pub use backend::{HistoryBackend, MigrationBackend};
pub use client::ApiClient;
pub use error::ApiError;
pub use token::{NoAuth, TokenSource};
