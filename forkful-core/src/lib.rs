pub mod error;
pub mod ingredient;
pub mod nutrition;
pub mod shopping_list;
pub mod units;

pub use error::IngredientError;
pub use ingredient::{ingredients_from_value, ingredients_to_value, Ingredient};
pub use nutrition::{estimate_nutrition, NutritionSummary};
pub use shopping_list::{build_shopping_list, IngredientSource};
pub use units::convert;
