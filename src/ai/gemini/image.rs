use super::client::GeminiHttpClient;
use super::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
    RequestContent, SafetySetting, TextPart,
};
use crate::ai::{ImageProvider, ProviderResponse};
use crate::models::GenerationRequest;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

const HATE_SPEECH_CATEGORY: &str = "HARM_CATEGORY_HATE_SPEECH";
const BLOCK_LOW_AND_ABOVE: &str = "BLOCK_LOW_AND_ABOVE";

/// Gemini image generation with a fixed profile: one candidate, image-only
/// output, hate speech blocked at low-and-above.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self::with_timeout(api_key, model, Duration::from_secs(120), client)
    }

    pub fn with_timeout(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: None,
                parts: vec![TextPart {
                    text: request.prompt().to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                candidate_count: 1,
                image_config: Some(ImageConfig {
                    aspect_ratio: request.aspect_ratio().to_string(),
                }),
            },
            safety_settings: vec![SafetySetting {
                category: HATE_SPEECH_CATEGORY.to_string(),
                threshold: BLOCK_LOW_AND_ABOVE.to_string(),
            }],
        }
    }
}

#[async_trait]
impl ImageProvider for GeminiImageClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderResponse> {
        tracing::debug!(
            "Sending image generation request to Gemini (model: {}, aspect ratio: {})",
            self.http.model(),
            request.aspect_ratio()
        );

        let response: GenerateContentResponse = self
            .http
            .generate_content(&Self::build_request(request))
            .await?;

        Ok(response.into())
    }
}
