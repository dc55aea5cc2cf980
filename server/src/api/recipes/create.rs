use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Ingredient, NewRecipe};
use crate::schema::recipes;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use forkful_core::ingredients_to_value;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    /// Reference to an already-uploaded image (upload storage is handled
    /// elsewhere).
    pub image: Option<String>,
    pub dietary_tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

/// Validate the request fields; returns a client-facing message on failure.
fn validate_request(req: &CreateRecipeRequest) -> Result<(), String> {
    if req.title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if req.description.trim().is_empty() {
        return Err("Description cannot be empty".to_string());
    }
    if req.instructions.trim().is_empty() {
        return Err("Instructions cannot be empty".to_string());
    }
    for ingredient in &req.ingredients {
        ingredient.validate().map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if let Err(message) = validate_request(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let ingredients_json = match ingredients_to_value(&request.ingredients) {
        Ok(v) => v,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid ingredients format".to_string(),
                }),
            )
                .into_response()
        }
    };

    let dietary_tags: Vec<Option<String>> = request
        .dietary_tags
        .unwrap_or_default()
        .into_iter()
        .map(Some)
        .collect();

    let new_recipe = NewRecipe {
        user_id: user.id,
        title: &request.title,
        description: &request.description,
        ingredients: ingredients_json,
        instructions: &request.instructions,
        image: request.image.as_deref(),
        dietary_tags: &dietary_tags,
    };

    match diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .returning(recipes::id)
        .get_result::<Uuid>(&mut conn)
    {
        Ok(id) => (StatusCode::CREATED, Json(CreateRecipeResponse { id })).into_response(),
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: "Pancakes".to_string(),
            description: "Fluffy".to_string(),
            ingredients: vec![Ingredient {
                name: "flour".to_string(),
                amount: 250.0,
                unit: "g".to_string(),
                calories: None,
            }],
            instructions: "Mix and fry".to_string(),
            image: None,
            dietary_tags: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut req = request();
        req.title = "   ".to_string();
        assert_eq!(validate_request(&req).unwrap_err(), "Title cannot be empty");
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut req = request();
        req.description = String::new();
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_blank_instructions_rejected() {
        let mut req = request();
        req.instructions = "\n".to_string();
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_negative_ingredient_amount_rejected() {
        let mut req = request();
        req.ingredients[0].amount = -2.0;
        let message = validate_request(&req).unwrap_err();
        assert!(message.contains("negative amount"));
    }
}
