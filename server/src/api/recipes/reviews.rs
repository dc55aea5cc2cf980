use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewReview;
use crate::schema::{recipes, reviews, users};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    /// Star rating, 1 through 5 inclusive
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateReviewResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
}

fn rating_in_bounds(rating: i32) -> bool {
    (1..=5).contains(&rating)
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/reviews",
    tag = "reviews",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = CreateReviewResponse),
        (status = 400, description = "Invalid rating", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(recipe_id): Path<Uuid>,
    Json(request): Json<CreateReviewRequest>,
) -> impl IntoResponse {
    if !rating_in_bounds(request.rating) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Rating must be between 1 and 5".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let recipe_exists: Result<Uuid, _> = recipes::table
        .filter(recipes::id.eq(recipe_id))
        .filter(recipes::deleted_at.is_null())
        .select(recipes::id)
        .first(&mut conn);

    if let Err(e) = recipe_exists {
        return match e {
            diesel::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response(),
            _ => {
                tracing::error!("Failed to fetch recipe: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to fetch recipe".to_string(),
                    }),
                )
                    .into_response()
            }
        };
    }

    let new_review = NewReview {
        recipe_id,
        user_id: user.id,
        rating: request.rating,
        comment: request.comment.as_deref(),
    };

    match diesel::insert_into(reviews::table)
        .values(&new_review)
        .returning(reviews::id)
        .get_result::<Uuid>(&mut conn)
    {
        Ok(id) => (StatusCode::CREATED, Json(CreateReviewResponse { id })).into_response(),
        Err(e) => {
            tracing::error!("Failed to create review: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create review".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/reviews",
    tag = "reviews",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Reviews for the recipe, oldest first", body = ListReviewsResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_reviews(
    State(pool): State<Arc<DbPool>>,
    Path(recipe_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let recipe_exists: Result<Uuid, _> = recipes::table
        .filter(recipes::id.eq(recipe_id))
        .filter(recipes::deleted_at.is_null())
        .select(recipes::id)
        .first(&mut conn);

    if let Err(e) = recipe_exists {
        return match e {
            diesel::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response(),
            _ => {
                tracing::error!("Failed to fetch recipe: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to fetch recipe".to_string(),
                    }),
                )
                    .into_response()
            }
        };
    }

    let rows: Vec<(Uuid, i32, Option<String>, Uuid, String, DateTime<Utc>)> = match reviews::table
        .inner_join(users::table)
        .filter(reviews::recipe_id.eq(recipe_id))
        .order(reviews::created_at.asc())
        .select((
            reviews::id,
            reviews::rating,
            reviews::comment,
            reviews::user_id,
            users::username,
            reviews::created_at,
        ))
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch reviews: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch reviews".to_string(),
                }),
            )
                .into_response();
        }
    };

    let reviews = rows
        .into_iter()
        .map(
            |(id, rating, comment, author_id, author_username, created_at)| ReviewResponse {
                id,
                rating,
                comment,
                author_id,
                author_username,
                created_at,
            },
        )
        .collect();

    (StatusCode::OK, Json(ListReviewsResponse { reviews })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(rating_in_bounds(1));
        assert!(rating_in_bounds(3));
        assert!(rating_in_bounds(5));
        assert!(!rating_in_bounds(0));
        assert!(!rating_in_bounds(6));
        assert!(!rating_in_bounds(-1));
    }
}
