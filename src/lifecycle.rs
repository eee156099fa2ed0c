//! Record Lifecycle Manager.
//!
//! Orchestrates create/update/delete across the record store and the image
//! service, keeping the two ordered so a record never points at an image that
//! was skipped over, to the extent the failure handling below allows:
//!
//! - create uploads first and persists second; a persist failure leaves the
//!   uploaded image behind (known leak, kept for compatibility with the
//!   service this replaces)
//! - update destroys the old image before uploading its replacement; an
//!   upload failure at that point leaves the stored record holding the
//!   already-destroyed key (known race, same compatibility note)
//! - delete destroys the image first and removes the record only when the
//!   destroy succeeded

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::images::{ImageServiceError, ImageStore};
use crate::models::{Author, NewRecipe, Recipe, RecipeFields};
use crate::store::{RecipeStore, StoreError};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("image upload failed: {0}")]
    ImageUpload(#[source] ImageServiceError),

    #[error("image deletion failed: {0}")]
    ImageDeletion(#[source] ImageServiceError),

    #[error("recipe not found")]
    NotFound,

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

/// A replacement image supplied with an update, already past the intake
/// extension check.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub filename: String,
}

#[derive(Clone)]
pub struct RecipeLifecycle {
    store: Arc<dyn RecipeStore>,
    images: Arc<dyn ImageStore>,
}

impl RecipeLifecycle {
    pub fn new(store: Arc<dyn RecipeStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { store, images }
    }

    /// Upload the image, then persist the record with the returned url/key
    /// and the caller's identity attached.
    ///
    /// If the store rejects the record after the upload succeeded, the
    /// uploaded image is not cleaned up.
    pub async fn create(
        &self,
        fields: RecipeFields,
        image: ImageFile,
        author: Author,
    ) -> Result<Recipe, LifecycleError> {
        let uploaded = self
            .images
            .upload(image.bytes, &image.filename)
            .await
            .map_err(LifecycleError::ImageUpload)?;

        let recipe = self
            .store
            .create(NewRecipe {
                name: fields.name,
                description: fields.description,
                price: fields.price,
                image: uploaded.url,
                image_id: uploaded.key,
                author,
            })
            .await?;

        tracing::info!(id = %recipe.id, "recipe created");
        Ok(recipe)
    }

    /// Replace the image if a new one was supplied, then apply the scalar
    /// fields and save.
    ///
    /// The old image is destroyed before the replacement upload starts. An
    /// upload failure after that point propagates without saving, so the
    /// stored record keeps referencing the key that was just destroyed.
    pub async fn update(
        &self,
        id: Uuid,
        fields: RecipeFields,
        image: Option<ImageFile>,
    ) -> Result<Recipe, LifecycleError> {
        let mut recipe = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound)?;

        if let Some(image) = image {
            if let Some(key) = recipe.image_id.clone() {
                self.images
                    .destroy(&key)
                    .await
                    .map_err(LifecycleError::ImageDeletion)?;
            }
            let uploaded = self
                .images
                .upload(image.bytes, &image.filename)
                .await
                .map_err(LifecycleError::ImageUpload)?;
            recipe.image = Some(uploaded.url);
            recipe.image_id = Some(uploaded.key);
        }

        recipe.name = fields.name;
        recipe.description = fields.description;
        recipe.price = fields.price;

        self.store.save(&recipe).await?;

        tracing::info!(id = %recipe.id, "recipe updated");
        Ok(recipe)
    }

    /// Destroy the image first; remove the record only if that succeeded. On
    /// destroy failure the record stays in place untouched.
    pub async fn delete(&self, id: Uuid) -> Result<(), LifecycleError> {
        let recipe = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound)?;

        if let Some(key) = &recipe.image_id {
            self.images
                .destroy(key)
                .await
                .map_err(LifecycleError::ImageDeletion)?;
        }

        self.store.remove(recipe.id).await?;

        tracing::info!(id = %recipe.id, "recipe deleted");
        Ok(())
    }
}
