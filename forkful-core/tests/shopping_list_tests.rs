//! End-to-end tests of the aggregation path: stored JSON in, shopping
//! list out, the way the server drives the core crate.

use std::collections::HashMap;

use forkful_core::{
    build_shopping_list, estimate_nutrition, ingredients_from_value, IngredientError,
    IngredientSource,
};
use serde_json::json;
use uuid::Uuid;

/// Source backed by stored (serialized) ingredient columns, so the
/// deserialization contract is exercised along with aggregation.
struct StoredSource {
    rows: HashMap<Uuid, serde_json::Value>,
}

impl IngredientSource for StoredSource {
    fn ingredients_for(
        &mut self,
        recipe_id: Uuid,
    ) -> Result<Option<Vec<forkful_core::Ingredient>>, IngredientError> {
        match self.rows.get(&recipe_id) {
            Some(value) => Ok(Some(ingredients_from_value(value.clone())?)),
            None => Ok(None),
        }
    }
}

#[test]
fn aggregates_across_stored_recipes() {
    let pancakes = Uuid::new_v4();
    let omelette = Uuid::new_v4();
    let mut source = StoredSource {
        rows: HashMap::from([
            (
                pancakes,
                json!([
                    {"name": "flour", "amount": 250.0, "unit": "g", "calories": 910.0},
                    {"name": "egg", "amount": 2.0, "unit": "piece", "calories": 156.0}
                ]),
            ),
            (
                omelette,
                json!([
                    {"name": "egg", "amount": 2.0, "unit": "piece", "calories": 156.0},
                    {"name": "salt", "amount": 1.0, "unit": "tsp"}
                ]),
            ),
        ]),
    };

    let items = build_shopping_list(&mut source, &[pancakes, omelette]).unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["flour", "egg", "egg", "salt"]);

    // The combined list feeds the nutrition estimator unchanged.
    let summary = estimate_nutrition(&items);
    assert_eq!(summary.calories, 910.0 + 156.0 + 156.0);
}

#[test]
fn unknown_ids_are_dropped_from_the_list() {
    let known = Uuid::new_v4();
    let mut source = StoredSource {
        rows: HashMap::from([(
            known,
            json!([{"name": "butter", "amount": 100.0, "unit": "g"}]),
        )]),
    };

    let items = build_shopping_list(&mut source, &[Uuid::new_v4(), known, Uuid::new_v4()]).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "butter");
}

#[test]
fn corrupt_stored_row_fails_the_whole_build() {
    let good = Uuid::new_v4();
    let corrupt = Uuid::new_v4();
    let mut source = StoredSource {
        rows: HashMap::from([
            (
                good,
                json!([{"name": "butter", "amount": 100.0, "unit": "g"}]),
            ),
            (corrupt, json!("not an ingredient list")),
        ]),
    };

    let result = build_shopping_list(&mut source, &[good, corrupt]);
    assert!(matches!(result, Err(IngredientError::Malformed(_))));
}
