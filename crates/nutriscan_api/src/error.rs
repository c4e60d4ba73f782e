use std::path::PathBuf;

use thiserror::Error;

/// Errors from remote calls. These propagate to the UI boundary for an
/// explicit retry; nothing here is swallowed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (DNS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected our credentials. The token source has already
    /// been told to drop the session by the time this is returned.
    #[error("authentication required or session expired")]
    Unauthorized,

    /// Non-2xx status outside the envelope contract.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The envelope came back with `success = false`.
    #[error("{0}")]
    Api(String),

    /// A correction photo could not be read from disk.
    #[error("failed to read attachment {path}: {source}")]
    Attachment {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    /// Whether a retry without re-authentication could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
