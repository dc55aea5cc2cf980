use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::{recipes, users};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use forkful_core::{convert, estimate_nutrition, ingredients_from_value, NutritionSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetRecipeParams {
    /// Measurement unit to display ingredient amounts in (e.g. "oz").
    /// Pairs without a defined conversion keep their amount unchanged.
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub image: Option<String>,
    pub dietary_tags: Vec<String>,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Calorie estimate computed from the ingredient list.
    pub nutrition: NutritionSummary,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = recipes)]
struct RecipeRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    ingredients: serde_json::Value,
    instructions: String,
    image: Option<String>,
    dietary_tags: Vec<Option<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Re-express every ingredient amount in the requested unit. `convert`
/// multiplies by 1 for undefined pairs and reports no failure, so all
/// lines come back labeled with the requested unit regardless.
fn ingredients_in_unit(ingredients: Vec<Ingredient>, to_unit: &str) -> Vec<Ingredient> {
    ingredients
        .into_iter()
        .map(|i| {
            let amount = convert(i.amount, &i.unit, to_unit);
            Ingredient {
                amount,
                unit: to_unit.to_string(),
                ..i
            }
        })
        .collect()
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID"),
        GetRecipeParams
    ),
    responses(
        (status = 200, description = "Recipe details with nutrition estimate", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Query(params): Query<GetRecipeParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let (recipe, author_username): (RecipeRow, String) = match recipes::table
        .inner_join(users::table)
        .filter(recipes::id.eq(id))
        .filter(recipes::deleted_at.is_null())
        .select((RecipeRow::as_select(), users::username))
        .first(&mut conn)
    {
        Ok(r) => r,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    // Corrupted ingredient data must surface, not degrade to an empty list.
    let ingredients: Vec<Ingredient> = match ingredients_from_value(recipe.ingredients) {
        Ok(i) => i,
        Err(e) => {
            tracing::error!("Corrupt ingredient data for recipe {}: {}", recipe.id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Recipe ingredient data is corrupted".to_string(),
                }),
            )
                .into_response();
        }
    };

    // Calories are per line item, not per unit, so estimate before any
    // display conversion.
    let nutrition = estimate_nutrition(&ingredients);

    let ingredients = match params.unit {
        Some(ref unit) => ingredients_in_unit(ingredients, unit),
        None => ingredients,
    };

    let response = RecipeResponse {
        id: recipe.id,
        title: recipe.title,
        description: recipe.description,
        ingredients,
        instructions: recipe.instructions,
        image: recipe.image,
        dietary_tags: recipe.dietary_tags.into_iter().flatten().collect(),
        author_id: recipe.user_id,
        author_username,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
        nutrition,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, amount: f64, unit: &str) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
            calories: None,
        }
    }

    #[test]
    fn test_amounts_convert_to_requested_unit() {
        let converted = ingredients_in_unit(vec![ingredient("flour", 100.0, "g")], "oz");
        assert_eq!(converted[0].unit, "oz");
        assert!((converted[0].amount - 3.53).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_pairs_keep_their_amount() {
        let converted = ingredients_in_unit(vec![ingredient("vanilla", 1.0, "tsp")], "oz");
        assert_eq!(converted[0].amount, 1.0);
        assert_eq!(converted[0].unit, "oz");
    }

    #[test]
    fn test_order_and_calories_survive_conversion() {
        let mut flour = ingredient("flour", 100.0, "g");
        flour.calories = Some(364.0);
        let converted = ingredients_in_unit(vec![flour, ingredient("butter", 50.0, "g")], "oz");
        assert_eq!(converted[0].name, "flour");
        assert_eq!(converted[0].calories, Some(364.0));
        assert_eq!(converted[1].name, "butter");
        assert!((converted[1].amount - 1.765).abs() < 1e-9);
    }
}
