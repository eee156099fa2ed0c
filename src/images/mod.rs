//! Image-service boundary.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpImageStore;

#[derive(Debug, Error)]
pub enum ImageServiceError {
    #[error("image service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image service rejected the request: {0}")]
    Rejected(String),
}

/// What the image service hands back after a successful upload. The url is
/// public; the key is what `destroy` later takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
    pub key: String,
}

/// Trait for the external image-hosting service, enabling mockability in tests.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload raw image bytes, returning the public URL and storage key.
    async fn upload(&self, bytes: Vec<u8>, filename: &str)
        -> Result<UploadedImage, ImageServiceError>;

    /// Remove a previously uploaded image by its storage key.
    async fn destroy(&self, key: &str) -> Result<(), ImageServiceError>;
}

/// Extensions the upload intake accepts, matched case-insensitively against
/// the submitted filename.
const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Check a submitted filename before anything touches the image service or the
/// record store.
pub fn is_image_filename(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            ALLOWED_IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
