use crate::api::ErrorResponse;
use crate::models::{Author, Recipe};
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Public URL of the recipe image
    pub image: Option<String>,
    /// Image-service key backing the image URL
    pub image_id: Option<String>,
    pub author: Author,
    /// Ids of comments attached to this recipe (stored elsewhere)
    pub comment_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(r: Recipe) -> Self {
        RecipeResponse {
            id: r.id,
            name: r.name,
            description: r.description,
            price: r.price,
            image: r.image,
            image_id: r.image_id,
            author: r.author,
            comment_ids: r.comment_ids,
            created_at: r.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let recipe = match state.store.find_by_id(id).await {
        Ok(Some(recipe)) => recipe,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch recipe");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(RecipeResponse::from(recipe))).into_response()
}
