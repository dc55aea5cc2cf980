pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod reviews;
pub mod share;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/export", get(export::export_recipe))
        .route("/{id}/share", get(share::share_recipe))
        .route(
            "/{id}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        export::export_recipe,
        share::share_recipe,
        reviews::list_reviews,
        reviews::create_review,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        list::ListRecipesResponse,
        list::RecipeSummary,
        list::PaginationMetadata,
        get::RecipeResponse,
        update::UpdateRecipeRequest,
        share::ShareResponse,
        reviews::CreateReviewRequest,
        reviews::CreateReviewResponse,
        reviews::ReviewResponse,
        reviews::ListReviewsResponse,
    ))
)]
pub struct ApiDoc;
