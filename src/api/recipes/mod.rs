pub mod create;
pub mod delete;
mod form;
pub mod get;
pub mod list;
pub mod update;

use crate::SharedState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        list::ListRecipesResponse,
        list::RecipeSummary,
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        get::RecipeResponse,
        update::UpdateRecipeRequest,
    ))
)]
pub struct ApiDoc;
