use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who created a recipe. Captured at create time and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Public URL of the hosted image. Set together with `image_id`.
    pub image: Option<String>,
    /// Image-service key for the hosted image. Set together with `image`.
    pub image_id: Option<String>,
    pub author: Author,
    /// Comments are stored elsewhere; we only hold references.
    pub comment_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Field set accepted when creating a recipe. Image url/key and author are
/// attached by the lifecycle manager, not by the caller.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub image_id: String,
    pub author: Author,
}

/// Caller-editable scalar fields, used for both create and update input.
/// Author and comment references are never settable through this struct.
#[derive(Debug, Clone)]
pub struct RecipeFields {
    pub name: String,
    pub description: String,
    pub price: f64,
}
