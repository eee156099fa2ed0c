use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::SharedState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use utoipa::ToSchema;
use uuid::Uuid;

use super::form::parse_recipe_form;

/// Multipart body for recipe updates. All scalar fields are applied as
/// submitted; the image file is optional and replaces the current image when
/// present.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UpdateRecipeRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body(content_type = "multipart/form-data", content = UpdateRecipeRequest),
    responses(
        (status = 200, description = "Recipe updated successfully"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 502, description = "Image service failure", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    AuthUser(_author): AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match parse_recipe_form(multipart).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match state.lifecycle.update(id, form.fields, form.image).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}
