use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::SharedState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::form::parse_recipe_form;

/// Multipart body for recipe creation. The image file is required and must
/// be named `.jpg/.jpeg/.png/.gif`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body(content_type = "multipart/form-data", content = CreateRecipeRequest),
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Image service failure", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    AuthUser(author): AuthUser,
    State(state): State<SharedState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match parse_recipe_form(multipart).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    let image = match form.image {
        Some(image) => image,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No image file provided".to_string(),
                }),
            )
                .into_response()
        }
    };

    let recipe = match state.lifecycle.create(form.fields, image, author).await {
        Ok(recipe) => recipe,
        Err(e) => return e.into_response(),
    };

    (
        StatusCode::CREATED,
        Json(CreateRecipeResponse { id: recipe.id }),
    )
        .into_response()
}
