//! Shopping-list aggregation across selected recipes.

use uuid::Uuid;

use crate::error::IngredientError;
use crate::ingredient::Ingredient;

/// Access to stored ingredient lists, keyed by recipe id.
///
/// The server implements this over the database; tests use a map-backed
/// fake. `Ok(None)` means "no such recipe" and is not an error.
pub trait IngredientSource {
    fn ingredients_for(&mut self, recipe_id: Uuid) -> Result<Option<Vec<Ingredient>>, IngredientError>;
}

/// Concatenate the ingredient lists of the given recipes.
///
/// Recipes are visited in the order their ids were given and each recipe's
/// internal ingredient order is preserved. Ids that resolve to no recipe
/// are dropped silently; the result carries no partial-failure indicator.
/// Duplicate ingredient names are NOT merged: two recipes that each need
/// "2 eggs" produce two line items. Consumers wanting combined totals
/// normalize units per item themselves (see [`crate::units::convert`]).
///
/// A malformed stored ingredient list aborts the whole call.
pub fn build_shopping_list<S: IngredientSource + ?Sized>(
    source: &mut S,
    recipe_ids: &[Uuid],
) -> Result<Vec<Ingredient>, IngredientError> {
    let mut items = Vec::new();
    for &recipe_id in recipe_ids {
        match source.ingredients_for(recipe_id)? {
            Some(ingredients) => items.extend(ingredients),
            None => continue,
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeSource {
        recipes: HashMap<Uuid, Vec<Ingredient>>,
    }

    impl IngredientSource for FakeSource {
        fn ingredients_for(
            &mut self,
            recipe_id: Uuid,
        ) -> Result<Option<Vec<Ingredient>>, IngredientError> {
            Ok(self.recipes.get(&recipe_id).cloned())
        }
    }

    fn ingredient(name: &str) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount: 2.0,
            unit: "piece".to_string(),
            calories: None,
        }
    }

    #[test]
    fn test_concatenates_in_request_order() {
        let r1 = Uuid::new_v4();
        let r2 = Uuid::new_v4();
        let mut source = FakeSource {
            recipes: HashMap::from([
                (r1, vec![ingredient("flour"), ingredient("butter")]),
                (r2, vec![ingredient("sugar")]),
            ]),
        };

        let items = build_shopping_list(&mut source, &[r1, r2]).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["flour", "butter", "sugar"]);

        let items = build_shopping_list(&mut source, &[r2, r1]).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["sugar", "flour", "butter"]);
    }

    #[test]
    fn test_duplicates_are_not_merged() {
        let r1 = Uuid::new_v4();
        let r2 = Uuid::new_v4();
        let mut source = FakeSource {
            recipes: HashMap::from([
                (r1, vec![ingredient("egg")]),
                (r2, vec![ingredient("egg")]),
            ]),
        };

        let items = build_shopping_list(&mut source, &[r1, r2]).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "egg");
        assert_eq!(items[1].name, "egg");
        assert_eq!(items[0].amount, 2.0);
        assert_eq!(items[1].amount, 2.0);
    }

    #[test]
    fn test_missing_recipes_are_skipped_silently() {
        let r1 = Uuid::new_v4();
        let mut source = FakeSource {
            recipes: HashMap::from([(r1, vec![ingredient("flour")])]),
        };

        let items = build_shopping_list(&mut source, &[r1, Uuid::new_v4()]).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "flour");
    }

    #[test]
    fn test_empty_selection_yields_empty_list() {
        let mut source = FakeSource {
            recipes: HashMap::new(),
        };
        assert!(build_shopping_list(&mut source, &[]).unwrap().is_empty());
    }
}
