//! User profile, favorites, correction, and admin types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::product::Product;

/// Profile returned by `GET /user/me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<HashMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for `POST /user/preferences`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePreferencesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diets: Option<Vec<String>>,
}

/// One saved favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// One page of favorites from `GET /favorites`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritesPage {
    pub favorites: Vec<Favorite>,
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

/// Payload of `GET /favorites/{id}/check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}

/// Review state of a submitted correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for CorrectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionStatus::Pending => write!(f, "pending"),
            CorrectionStatus::Approved => write!(f, "approved"),
            CorrectionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A user-submitted product data correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub id: String,
    pub product_id: String,
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub status: CorrectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Aggregate counters from `GET /admin/stats`. Unknown counters are kept
/// verbatim so the dashboard contract can grow without breaking us.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_scans: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub pending_corrections: u64,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_status_parses_lowercase() {
        let c: Correction = serde_json::from_str(
            r#"{"id":"c1","product_id":"p1","field_name":"name",
                "old_value":"Oat Drnk","new_value":"Oat Drink","status":"pending"}"#,
        )
        .unwrap();
        assert_eq!(c.status, CorrectionStatus::Pending);
    }

    #[test]
    fn admin_stats_keeps_unknown_counters() {
        let raw = r#"{"total_products":10,"pending_corrections":2,"scans_today":7}"#;
        let stats: AdminStats = serde_json::from_str(raw).unwrap();
        assert_eq!(stats.total_products, 10);
        assert_eq!(stats.extra["scans_today"], 7);
    }

    #[test]
    fn preferences_request_omits_unset_fields() {
        let request = UpdatePreferencesRequest {
            allergies: Some(vec!["Milk".into()]),
            diets: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["allergies"][0], "Milk");
        assert!(json.get("diets").is_none());
    }
}
