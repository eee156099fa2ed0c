use crate::api::ErrorResponse;
use crate::listing;
use crate::models::{Author, Recipe};
use crate::SharedState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Name search term. Matched case-insensitively; regex metacharacters in
    /// the term are treated literally.
    pub search: Option<String>,
    /// 1-based page number. Absent or non-numeric values mean page 1.
    pub page: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Public URL of the recipe image, if one is attached
    pub image: Option<String>,
    pub author: Author,
    pub created_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeSummary {
    fn from(r: Recipe) -> Self {
        RecipeSummary {
            id: r.id,
            name: r.name,
            description: r.description,
            price: r.price,
            image: r.image,
            author: r.author,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    /// Current page number
    pub current: u64,
    /// Total page count for the active filter
    pub pages: u64,
    /// Present when a search matched nothing on this page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_match: Option<String>,
    /// Echo of the search term, if one was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Present when the fetch failed but the listing still rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "One page of recipes", body = ListRecipesResponse),
        (status = 500, description = "Record store failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<SharedState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let result = match listing::list(
        state.store.as_ref(),
        params.search.as_deref(),
        params.page.as_deref(),
    )
    .await
    {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "failed to list recipes");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let no_match = result
        .no_match
        .then(|| "No recipes match your search, please try again.".to_string());

    (
        StatusCode::OK,
        Json(ListRecipesResponse {
            recipes: result.recipes.into_iter().map(RecipeSummary::from).collect(),
            current: result.current,
            pages: result.pages,
            no_match,
            search: result.search,
            warning: result.warning,
        }),
    )
        .into_response()
}
