use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use forkful_core::ingredients_to_value;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Full-replace update. Authorship is immutable; only the author's own
/// recipes match the update filter.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub image: Option<String>,
    pub dietary_tags: Option<Vec<String>>,
}

fn validate_request(req: &UpdateRecipeRequest) -> Result<(), String> {
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
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 204, description = "Recipe updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    if let Err(message) = validate_request(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response();
    }

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

    let mut conn = get_conn!(pool);

    let updated = diesel::update(
        recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::user_id.eq(user.id))
            .filter(recipes::deleted_at.is_null()),
    )
    .set((
        recipes::title.eq(&request.title),
        recipes::description.eq(&request.description),
        recipes::ingredients.eq(&ingredients_json),
        recipes::instructions.eq(&request.instructions),
        recipes::image.eq(request.image.as_deref()),
        recipes::dietary_tags.eq(&dietary_tags),
        recipes::updated_at.eq(Utc::now()),
    ))
    .execute(&mut conn);

    match updated {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to update recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
