use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::recipes;
use crate::AppState;
use axum::routing::post;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use diesel::prelude::*;
use forkful_core::{
    build_shopping_list, ingredients_from_value, IngredientError, IngredientSource,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/shopping-list (mounted at /api/shopping-list)
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(build))
}

#[derive(OpenApi)]
#[openapi(
    paths(build),
    components(schemas(ShoppingListRequest, ShoppingListResponse))
)]
pub struct ApiDoc;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ShoppingListRequest {
    /// Recipes to aggregate, in the order their ingredients should appear
    pub recipe_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShoppingListResponse {
    pub items: Vec<Ingredient>,
}

/// Database-backed implementation of the core crate's ingredient lookup.
struct DbIngredientSource<'a> {
    conn: &'a mut PgConnection,
}

impl IngredientSource for DbIngredientSource<'_> {
    fn ingredients_for(
        &mut self,
        recipe_id: Uuid,
    ) -> Result<Option<Vec<Ingredient>>, IngredientError> {
        let stored: serde_json::Value = match recipes::table
            .filter(recipes::id.eq(recipe_id))
            .filter(recipes::deleted_at.is_null())
            .select(recipes::ingredients)
            .first(&mut *self.conn)
        {
            Ok(v) => v,
            Err(diesel::NotFound) => {
                // Unknown ids are dropped from the list without a partial
                // failure indicator; the aggregator treats None as "skip".
                tracing::debug!("Shopping list skipped missing recipe {}", recipe_id);
                return Ok(None);
            }
            Err(e) => return Err(IngredientError::Lookup(e.to_string())),
        };

        ingredients_from_value(stored).map(Some)
    }
}

#[utoipa::path(
    post,
    path = "/api/shopping-list",
    tag = "shopping_list",
    request_body = ShoppingListRequest,
    responses(
        (status = 200, description = "Concatenated ingredient list", body = ShoppingListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Stored ingredient data is corrupted", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn build(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<ShoppingListRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);
    let mut source = DbIngredientSource { conn: &mut *conn };

    match build_shopping_list(&mut source, &request.recipe_ids) {
        Ok(items) => (StatusCode::OK, Json(ShoppingListResponse { items })).into_response(),
        Err(IngredientError::Malformed(e)) => {
            tracing::error!("Corrupt ingredient data while building shopping list: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Recipe ingredient data is corrupted".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to build shopping list: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to build shopping list".to_string(),
                }),
            )
                .into_response()
        }
    }
}
