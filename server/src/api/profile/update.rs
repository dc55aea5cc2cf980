use crate::api::ErrorResponse;
use crate::api::profile::get::ProfileResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Fields omitted from the request are left untouched. Dietary tags are
/// stored as given: order preserved, duplicates not filtered.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// Reference to an already-uploaded avatar image
    pub avatar: Option<String>,
    pub dietary_tags: Option<Vec<String>>,
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct ProfileChanges<'a> {
    avatar: Option<&'a str>,
    dietary_tags: Option<Vec<Option<String>>>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let changes = ProfileChanges {
        avatar: request.avatar.as_deref(),
        dietary_tags: request
            .dietary_tags
            .map(|tags| tags.into_iter().map(Some).collect()),
        updated_at: Utc::now(),
    };

    let updated: User = match diesel::update(users::table.filter(users::id.eq(user.id)))
        .set(changes)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
        Err(e) => {
            tracing::error!("Failed to update profile: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update profile".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(ProfileResponse {
            id: updated.id,
            username: updated.username,
            email: updated.email,
            avatar: updated.avatar,
            dietary_tags: updated.dietary_tags.into_iter().flatten().collect(),
            created_at: updated.created_at,
        }),
    )
        .into_response()
}
