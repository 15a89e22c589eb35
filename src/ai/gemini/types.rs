//! Gemini `generateContent` payload types.
//!
//! Response types are deliberately loose: every field is optional and
//! `inlineData.data` is kept as raw JSON so each representation the API has
//! used can be mapped onto an [`ImagePayload`].

use crate::ai::response::{self, ProviderResponse};
use crate::image::ImagePayload;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
pub struct TextPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    pub candidate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default, alias = "prompt_feedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, alias = "block_reason")]
    pub block_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, alias = "finish_reason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl InlineData {
    fn into_payload(self) -> ImagePayload {
        match self.data {
            None | Some(Value::Null) => ImagePayload::unsupported("null"),
            Some(Value::String(text)) => ImagePayload::Base64Text(text),
            Some(Value::Array(items)) => byte_array(&items)
                .map(ImagePayload::RawBytes)
                .unwrap_or_else(|| ImagePayload::unsupported("array")),
            Some(Value::Bool(_)) => ImagePayload::unsupported("bool"),
            Some(Value::Number(_)) => ImagePayload::unsupported("number"),
            Some(Value::Object(_)) => ImagePayload::unsupported("object"),
        }
    }
}

/// Some API generations emit bytes as a JSON array of integers.
fn byte_array(items: &[Value]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

impl From<Part> for response::Part {
    fn from(part: Part) -> Self {
        match (part.inline_data, part.text) {
            (Some(inline), _) => response::Part::InlineData(response::InlineData {
                mime_type: inline.mime_type.clone(),
                payload: inline.into_payload(),
            }),
            (None, Some(text)) => response::Part::Text(text),
            (None, None) => response::Part::Metadata,
        }
    }
}

impl From<Candidate> for response::Candidate {
    fn from(candidate: Candidate) -> Self {
        response::Candidate {
            content: candidate.content.map(|content| response::Content {
                parts: content
                    .parts
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            }),
            finish_reason: candidate.finish_reason,
        }
    }
}

impl From<GenerateContentResponse> for ProviderResponse {
    fn from(response: GenerateContentResponse) -> Self {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            tracing::warn!("Gemini blocked the prompt: {}", reason);
        }

        ProviderResponse {
            candidates: response
                .candidates
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
