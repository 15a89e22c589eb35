use crate::ai::response::{InlineData, Part, ProviderResponse};
use crate::{Error, Result};

/// Pick the image payload out of a provider response.
///
/// Only the first candidate is inspected, and within it the first part that
/// carries an inline payload wins. Later parts and candidates are ignored.
pub fn extract_payload(response: ProviderResponse) -> Result<InlineData> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(Error::EmptyResponse)?;

    if let Some(reason) = &candidate.finish_reason {
        tracing::debug!("First candidate finish reason: {}", reason);
    }

    let parts = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default();

    if parts.is_empty() {
        return Err(Error::EmptyResponse);
    }

    parts
        .into_iter()
        .find_map(|part| match part {
            Part::InlineData(inline_data) => Some(inline_data),
            Part::Text(_) | Part::Metadata => None,
        })
        .ok_or_else(|| {
            tracing::error!("No image blobs found in response");
            Error::NoImageFound
        })
}
