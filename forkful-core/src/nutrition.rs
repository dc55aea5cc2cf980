//! Nutrition estimation over an ingredient list.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ingredient::Ingredient;

/// Nutrient totals for a recipe.
///
/// Currently only calories. Further totals (protein, fat, ...) are meant to
/// be added as new defaulted fields; existing callers keep working because
/// the struct derives `Default` and deserializes with `#[serde(default)]`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NutritionSummary {
    pub calories: f64,
}

/// Sum the per-ingredient calorie estimates.
///
/// Ingredients without a calorie value contribute 0. Never fails; an empty
/// list yields a zeroed summary.
pub fn estimate_nutrition(ingredients: &[Ingredient]) -> NutritionSummary {
    let calories = ingredients.iter().map(|i| i.calories.unwrap_or(0.0)).sum();
    NutritionSummary { calories }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, calories: Option<f64>) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount: 1.0,
            unit: "piece".to_string(),
            calories,
        }
    }

    #[test]
    fn test_empty_list_is_zero_calories() {
        assert_eq!(estimate_nutrition(&[]), NutritionSummary { calories: 0.0 });
    }

    #[test]
    fn test_sums_calories() {
        let ingredients = vec![
            ingredient("butter", Some(100.0)),
            ingredient("sugar", Some(50.0)),
        ];
        assert_eq!(estimate_nutrition(&ingredients).calories, 150.0);
    }

    #[test]
    fn test_missing_calories_count_as_zero() {
        let ingredients = vec![
            ingredient("butter", Some(100.0)),
            ingredient("salt", None),
            ingredient("sugar", Some(50.0)),
        ];
        assert_eq!(estimate_nutrition(&ingredients).calories, 150.0);
    }

    #[test]
    fn test_summary_deserializes_with_defaults() {
        let summary: NutritionSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.calories, 0.0);
    }
}
