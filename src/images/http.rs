//! reqwest-backed client for the image-hosting service.

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use super::{ImageServiceError, ImageStore, UploadedImage};
use crate::config::ImageServiceConfig;

pub struct HttpImageStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

impl HttpImageStore {
    /// Build a client with the configured per-request timeout. A timed-out
    /// call comes back as `ImageServiceError::Request` like any other
    /// transport failure.
    pub fn new(config: ImageServiceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<UploadedImage, ImageServiceError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "image upload rejected");
            return Err(ImageServiceError::Rejected(format!("{status}: {body}")));
        }

        let body: UploadResponse = response.json().await?;
        Ok(UploadedImage {
            url: body.secure_url,
            key: body.public_id,
        })
    }

    async fn destroy(&self, key: &str) -> Result<(), ImageServiceError> {
        let response = self
            .client
            .post(format!("{}/destroy", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "public_id": key }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, key, "image destroy rejected");
            return Err(ImageServiceError::Rejected(format!("{status}: {body}")));
        }

        Ok(())
    }
}
