//! Provider-neutral view of a generation result.
//!
//! Providers have shipped several incompatible result schemas; every adapter
//! converts into these types so extraction never has to probe shapes.

use crate::image::ImagePayload;

#[derive(Debug, Default)]
pub struct ProviderResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default)]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug)]
pub enum Part {
    Text(String),
    InlineData(InlineData),
    /// Anything without text or an inline payload (thought signatures, etc).
    Metadata,
}

#[derive(Debug)]
pub struct InlineData {
    pub mime_type: Option<String>,
    pub payload: ImagePayload,
}

impl ProviderResponse {
    /// Single candidate holding the given parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: vec![Candidate::from_parts(parts)],
        }
    }

    /// Single candidate with a single inline payload part.
    pub fn from_payload(payload: ImagePayload) -> Self {
        Self::from_parts(vec![Part::inline(payload)])
    }
}

impl Candidate {
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            content: Some(Content { parts }),
            finish_reason: None,
        }
    }
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn inline(payload: ImagePayload) -> Self {
        Part::InlineData(InlineData {
            mime_type: None,
            payload,
        })
    }
}
