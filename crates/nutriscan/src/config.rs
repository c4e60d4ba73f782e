//! API endpoint configuration.
//!
//! Resolution order is environment first, hardcoded localhost fallback
//! last, matching how the mobile clients of this backend are configured.

use nutriscan_protocol::defaults::{DEFAULT_API_URL, DEFAULT_API_VERSION};

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_url: String,
    pub api_version: String,
}

impl ApiConfig {
    /// Resolve from `NUTRISCAN_API_URL` / `NUTRISCAN_API_VERSION`, falling
    /// back to `http://localhost:8000` and `v1`.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("NUTRISCAN_API_URL").ok(),
            std::env::var("NUTRISCAN_API_VERSION").ok(),
        )
    }

    fn resolve(api_url: Option<String>, api_version: Option<String>) -> Self {
        Self {
            api_url: api_url
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_version: api_version
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        }
    }

    /// Full versioned base URL, e.g. `http://localhost:8000/api/v1`.
    pub fn base_url(&self) -> String {
        format!(
            "{}/api/{}",
            self.api_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_localhost() {
        let config = ApiConfig::resolve(None, None);
        assert_eq!(config.base_url(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn explicit_values_win() {
        let config = ApiConfig::resolve(
            Some("https://api.nutriscan.app/".into()),
            Some("v2".into()),
        );
        assert_eq!(config.base_url(), "https://api.nutriscan.app/api/v2");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = ApiConfig::resolve(Some("  ".into()), Some(String::new()));
        assert_eq!(config.base_url(), "http://localhost:8000/api/v1");
    }
}
