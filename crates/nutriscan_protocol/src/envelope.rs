//! Response envelope used by every backend endpoint.

use serde::{Deserialize, Serialize};

/// Standard `{success, data, message, timestamp}` wrapper returned by the
/// backend. `data` is absent on some failure responses, so it stays
/// optional and callers decide whether a missing payload is an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload of a successful response.
    ///
    /// Returns the server-provided message (or a fallback) when the
    /// envelope reports failure or carries no data.
    pub fn into_data(self) -> Result<T, String> {
        if !self.success {
            return Err(self
                .message
                .unwrap_or_else(|| "request failed".to_string()));
        }
        self.data
            .ok_or_else(|| "response missing data payload".to_string())
    }
}
