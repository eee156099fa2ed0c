//! Multipart intake shared by create and update.
//!
//! The file-extension check happens here, before the lifecycle manager (and
//! therefore any external service) ever sees the request.

use axum::{
    extract::Multipart,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ErrorResponse;
use crate::images::is_image_filename;
use crate::lifecycle::ImageFile;
use crate::models::RecipeFields;

pub struct RecipeForm {
    pub fields: RecipeFields,
    pub image: Option<ImageFile>,
}

pub enum FormError {
    Read(String),
    MissingField(&'static str),
    InvalidPrice,
    NotAnImage,
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let message = match self {
            FormError::Read(detail) => format!("Failed to read multipart data: {detail}"),
            FormError::MissingField(field) => format!("Missing required field: {field}"),
            FormError::InvalidPrice => "Price must be a number".to_string(),
            FormError::NotAnImage => "Only image files are allowed".to_string(),
        };

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response()
    }
}

/// Pull the recipe fields and the optional image file out of a multipart
/// request. The image, when present, must carry an accepted extension; its
/// bytes are only read after that check passes.
pub async fn parse_recipe_form(mut multipart: Multipart) -> Result<RecipeForm, FormError> {
    let mut name = None;
    let mut description = None;
    let mut price = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FormError::Read(e.body_text()))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        match field_name.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| FormError::Read(e.body_text()))?,
                )
            }
            "description" => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| FormError::Read(e.body_text()))?,
                )
            }
            "price" => {
                price = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| FormError::Read(e.body_text()))?,
                )
            }
            "image" => {
                let filename = field.file_name().map(str::to_string).unwrap_or_default();
                if !is_image_filename(&filename) {
                    return Err(FormError::NotAnImage);
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Read(e.body_text()))?;
                image = Some(ImageFile {
                    bytes: bytes.to_vec(),
                    filename,
                });
            }
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or(FormError::MissingField("name"))?;
    let description = description.ok_or(FormError::MissingField("description"))?;
    let price = price
        .ok_or(FormError::MissingField("price"))?
        .trim()
        .parse::<f64>()
        .map_err(|_| FormError::InvalidPrice)?;

    Ok(RecipeForm {
        fields: RecipeFields {
            name,
            description,
            price,
        },
        image,
    })
}
