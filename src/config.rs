use std::env;
use std::time::Duration;

/// Connection settings for the image-hosting service.
///
/// Built once in `main` and handed to the client explicitly; nothing in this
/// crate reads image-service configuration from global state.
#[derive(Debug, Clone)]
pub struct ImageServiceConfig {
    pub base_url: String,
    pub api_key: String,
    /// Upper bound on each upload/destroy call. Expiry surfaces as a request
    /// error from the client.
    pub timeout: Duration,
}

impl ImageServiceConfig {
    /// Read configuration from `IMAGE_SERVICE_URL`, `IMAGE_SERVICE_API_KEY`,
    /// and optionally `IMAGE_SERVICE_TIMEOUT_SECS` (default 30).
    pub fn from_env() -> Result<Self, env::VarError> {
        let base_url = env::var("IMAGE_SERVICE_URL")?;
        let api_key = env::var("IMAGE_SERVICE_API_KEY")?;
        let timeout_secs = env::var("IMAGE_SERVICE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
