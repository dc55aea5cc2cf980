use crate::api::ErrorResponse;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShareResponse {
    pub share_url: String,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/share",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Canonical share link for the recipe", body = ShareResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn share_recipe(
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let exists: Result<Uuid, _> = recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::deleted_at.is_null())
        .select(recipes::id)
        .first(&mut conn);

    match exists {
        Ok(_) => (
            StatusCode::OK,
            Json(ShareResponse {
                share_url: format!("{}/recipes/{}", config.base_url, id),
            }),
        )
            .into_response(),
        Err(diesel::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
