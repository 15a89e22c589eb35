//! Request orchestration: validate, call the provider once, normalize.

use crate::ai::{GeminiImageClient, ImageProvider};
use crate::image;
use crate::models::{Config, GeneratedImage, GenerationRequest, ServiceResult, API_KEY_VAR};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{error, info, Instrument};
use uuid::Uuid;

/// Runs one generation per call. Holds no per-request state, so a single
/// instance can serve concurrent requests.
pub struct App {
    provider: Option<Arc<dyn ImageProvider>>,
}

impl App {
    /// Build an app around a concrete provider.
    ///
    /// This is primarily useful for tests and harnesses that inject mocks.
    pub fn with_provider(provider: Arc<dyn ImageProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// An app whose credentials are missing. Every valid request fails with a
    /// provider error until it is rebuilt with a key.
    pub fn without_credentials() -> Self {
        Self { provider: None }
    }

    /// Construct an app from environment configuration.
    pub fn from_config(config: &Config) -> Self {
        match &config.google_api_key {
            Some(api_key) => {
                info!("Image provider: Gemini (model: {})", config.model);
                let client = GeminiImageClient::with_timeout(
                    api_key.clone(),
                    config.model.clone(),
                    config.request_timeout,
                    reqwest::Client::new(),
                )
                .with_base_url(config.gemini_base_url.clone());
                Self::with_provider(Arc::new(client))
            }
            None => {
                error!("{} not set in environment", API_KEY_VAR);
                Self::without_credentials()
            }
        }
    }

    /// Generate an image and return it base64-encoded.
    pub async fn generate_image(&self, prompt: &str, aspect_ratio: &str) -> Result<GeneratedImage> {
        let request = GenerationRequest::new(prompt, aspect_ratio)?;

        let span = tracing::info_span!("generate_image", request_id = %Uuid::new_v4());
        self.run(request).instrument(span).await
    }

    /// Boundary form of [`App::generate_image`].
    pub async fn generate(&self, prompt: &str, aspect_ratio: &str) -> ServiceResult {
        self.generate_image(prompt, aspect_ratio).await.into()
    }

    async fn run(&self, request: GenerationRequest) -> Result<GeneratedImage> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            Error::Provider(format!("{} environment variable not set", API_KEY_VAR))
        })?;

        info!("Generating: {}...", request.prompt_preview());

        let response = provider.generate(&request).await.map_err(|e| {
            error!("Provider call failed: {}", e);
            e
        })?;

        let image = image::normalize(response).map_err(|e| {
            error!("Could not extract image: {}", e);
            e
        })?;

        let base64 = image::encode(&image);
        info!(
            "Returning {} ({} bytes, {} base64 chars)",
            image.format().mime_type(),
            image.len(),
            base64.len()
        );

        Ok(GeneratedImage {
            base64,
            format: image.format(),
            byte_len: image.len(),
        })
    }
}
