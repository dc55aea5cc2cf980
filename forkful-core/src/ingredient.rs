//! Ingredient value type and its stored representation.
//!
//! Ingredients are embedded in a recipe as an ordered JSON array, not kept
//! as a relational entity. The round trip through the stored form is
//! lossless for all four fields and preserves order.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::IngredientError;

/// One line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub name: String,
    /// Quantity in `unit`. Never negative for persisted ingredients.
    pub amount: f64,
    pub unit: String,
    /// Estimated calories for this line. Absent means "unknown", which
    /// counts as zero when summing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

impl Ingredient {
    /// Check the non-negative amount invariant.
    pub fn validate(&self) -> Result<(), IngredientError> {
        if self.amount < 0.0 {
            return Err(IngredientError::NegativeAmount {
                name: self.name.clone(),
                amount: self.amount,
            });
        }
        Ok(())
    }
}

/// Deserialize a stored ingredient list.
///
/// Malformed data is a fatal error for the read, not an empty default.
pub fn ingredients_from_value(value: serde_json::Value) -> Result<Vec<Ingredient>, IngredientError> {
    Ok(serde_json::from_value(value)?)
}

/// Serialize an ingredient list to its stored JSON form.
pub fn ingredients_to_value(ingredients: &[Ingredient]) -> Result<serde_json::Value, IngredientError> {
    Ok(serde_json::to_value(ingredients)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Ingredient> {
        vec![
            Ingredient {
                name: "flour".to_string(),
                amount: 250.0,
                unit: "g".to_string(),
                calories: Some(910.0),
            },
            Ingredient {
                name: "salt".to_string(),
                amount: 1.0,
                unit: "tsp".to_string(),
                calories: None,
            },
        ]
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let original = sample();
        let value = ingredients_to_value(&original).unwrap();
        let restored = ingredients_from_value(value).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_missing_calories_deserializes_as_none() {
        let value = json!([{"name": "egg", "amount": 2.0, "unit": "piece"}]);
        let ingredients = ingredients_from_value(value).unwrap();
        assert_eq!(ingredients[0].calories, None);
    }

    #[test]
    fn test_none_calories_omitted_from_stored_form() {
        let value = ingredients_to_value(&sample()).unwrap();
        assert!(value[1].get("calories").is_none());
        assert_eq!(value[0]["calories"], json!(910.0));
    }

    #[test]
    fn test_malformed_data_is_an_error() {
        let result = ingredients_from_value(json!({"not": "a list"}));
        assert!(matches!(result, Err(IngredientError::Malformed(_))));

        let result = ingredients_from_value(json!([{"name": "flour"}]));
        assert!(matches!(result, Err(IngredientError::Malformed(_))));
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let bad = Ingredient {
            name: "flour".to_string(),
            amount: -1.0,
            unit: "g".to_string(),
            calories: None,
        };
        assert!(matches!(
            bad.validate(),
            Err(IngredientError::NegativeAmount { .. })
        ));

        let zero = Ingredient {
            name: "water".to_string(),
            amount: 0.0,
            unit: "cup".to_string(),
            calories: None,
        };
        assert!(zero.validate().is_ok());
    }
}
