//! AI provider integration for image generation
//!
//! The core talks to providers through [`ImageProvider`]; the Gemini client is
//! the production implementation and [`MockImageProvider`] drives tests.

pub mod gemini;
pub mod mock;
pub mod response;

pub use gemini::GeminiImageClient;
pub use mock::MockImageProvider;
pub use response::ProviderResponse;

use crate::models::GenerationRequest;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Issue exactly one generation call. Implementations must not retry.
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderResponse>;
}
