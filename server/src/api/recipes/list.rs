use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Text};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Number of items to return (default: 20, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
    /// Case-insensitive substring match on title or description
    pub q: Option<String>,
    /// Keep only recipes carrying this dietary tag (e.g. "vegan")
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Total number of items available
    pub total: i64,
    /// Number of items requested (limit)
    pub limit: i64,
    /// Number of items skipped (offset)
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub dietary_tags: Vec<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub pagination: PaginationMetadata,
}

#[derive(Queryable)]
struct RecipeForList {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    image: Option<String>,
    dietary_tags: Vec<Option<String>>,
    created_at: DateTime<Utc>,
    /// Total count of all matching rows (from window function)
    total_count: i64,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "List of recipes, newest first", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    let text_pattern = params.q.as_ref().map(|q| {
        format!("%{}%", q.replace('%', "\\%").replace('_', "\\_"))
    });

    let mut conn = get_conn!(pool);

    let mut query = recipes::table
        .filter(recipes::deleted_at.is_null())
        .into_boxed();

    if let Some(ref pattern) = text_pattern {
        query = query.filter(
            recipes::title
                .ilike(pattern)
                .or(recipes::description.ilike(pattern)),
        );
    }

    if let Some(ref tag) = params.tag {
        query = query.filter(sql::<Bool>("").bind::<Text, _>(tag).sql(" = ANY(dietary_tags)"));
    }

    // COUNT(*) OVER() gives the total count before LIMIT/OFFSET in the
    // same query; Diesel has no native window function support.
    let results: Vec<RecipeForList> = match query
        .order(recipes::created_at.desc())
        .select((
            recipes::id,
            recipes::user_id,
            recipes::title,
            recipes::description,
            recipes::image,
            recipes::dietary_tags,
            recipes::created_at,
            sql::<BigInt>("COUNT(*) OVER()"),
        ))
        .limit(limit)
        .offset(offset)
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let total = results.first().map(|r| r.total_count).unwrap_or(0);

    let recipes = results
        .into_iter()
        .map(|r| RecipeSummary {
            id: r.id,
            title: r.title,
            description: r.description,
            image: r.image,
            dietary_tags: r.dietary_tags.into_iter().flatten().collect(),
            author_id: r.user_id,
            created_at: r.created_at,
        })
        .collect();

    (
        StatusCode::OK,
        Json(ListRecipesResponse {
            recipes,
            pagination: PaginationMetadata {
                total,
                limit,
                offset,
            },
        }),
    )
        .into_response()
}
