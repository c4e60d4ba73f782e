//! Product domain model.
//!
//! A product is denormalized into guest scan records at scan time, so every
//! field here must round-trip through serde unchanged.

use serde::{Deserialize, Serialize};

/// Nutrition values for a single basis (per 100 g or per serving).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_kcal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_kj: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proteins: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
}

/// Nutrition on both bases the backend reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    #[serde(default)]
    pub per_100g: NutritionFacts,
    #[serde(default)]
    pub per_serving: NutritionFacts,
}

/// A scanned product as returned by `POST /scan` and embedded in history
/// snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub barcode: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_sale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_parsed: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_roundtrips_through_json() {
        let product = Product {
            id: "prod_1".into(),
            barcode: "4006381333931".into(),
            name: "Oat Drink".into(),
            brand: Some("Grainful".into()),
            allergens: Some(vec!["Gluten".into()]),
            nutrition: Some(NutritionInfo {
                per_100g: NutritionFacts {
                    energy_kcal: Some(46.0),
                    sugars: Some(4.1),
                    ..Default::default()
                },
                per_serving: NutritionFacts::default(),
            }),
            ..Default::default()
        };
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn sparse_product_deserializes() {
        let raw = r#"{"id":"p","barcode":"123","name":"Water"}"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert!(product.nutrition.is_none());
        assert!(product.allergens.is_none());
    }
}
