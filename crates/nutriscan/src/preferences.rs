//! Dietary preference matching.
//!
//! The backend stores free-form allergy/diet strings; matching against a
//! product's allergen list is case-insensitive so "gluten" and "Gluten"
//! are one thing.

/// Common allergens, aligned with Open Food Facts categories.
pub const COMMON_ALLERGENS: [&str; 15] = [
    "Milk",
    "Eggs",
    "Peanuts",
    "Tree nuts",
    "Fish",
    "Shellfish",
    "Wheat",
    "Soy",
    "Sesame",
    "Gluten",
    "Mustard",
    "Celery",
    "Lupin",
    "Molluscs",
    "Sulphites",
];

/// Common diet types.
pub const COMMON_DIETS: [&str; 10] = [
    "Vegetarian",
    "Vegan",
    "Gluten-free",
    "Dairy-free",
    "Keto",
    "Paleo",
    "Halal",
    "Kosher",
    "Low-sodium",
    "Low-sugar",
];

/// Product allergens the user has declared an allergy to, preserving the
/// product's own casing and order.
pub fn allergen_warnings(product_allergens: &[String], user_allergies: &[String]) -> Vec<String> {
    product_allergens
        .iter()
        .filter(|allergen| {
            user_allergies
                .iter()
                .any(|allergy| allergy.eq_ignore_ascii_case(allergen))
        })
        .cloned()
        .collect()
}

/// Selections that are not in the given catalog (user-defined entries).
pub fn custom_entries(selected: &[String], catalog: &[&str]) -> Vec<String> {
    selected
        .iter()
        .filter(|entry| !catalog.iter().any(|known| known.eq_ignore_ascii_case(entry)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn warnings_match_case_insensitively() {
        let product = strings(&["Gluten", "Milk", "Soy"]);
        let user = strings(&["milk", "GLUTEN"]);
        assert_eq!(allergen_warnings(&product, &user), strings(&["Gluten", "Milk"]));
    }

    #[test]
    fn no_overlap_means_no_warnings() {
        let product = strings(&["Sesame"]);
        let user = strings(&["Milk"]);
        assert!(allergen_warnings(&product, &user).is_empty());
        assert!(allergen_warnings(&[], &user).is_empty());
    }

    #[test]
    fn custom_entries_exclude_catalog_items() {
        let selected = strings(&["Milk", "quinoa intolerance", "gluten"]);
        let custom = custom_entries(&selected, &COMMON_ALLERGENS);
        assert_eq!(custom, strings(&["quinoa intolerance"]));
    }
}
