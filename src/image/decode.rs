use super::payload::{ImagePayload, PayloadStream};
use crate::{Error, Result};
use base64::Engine as _;
use std::io::Read;

/// Normalize any payload representation into a flat byte buffer.
pub fn decode_payload(payload: ImagePayload) -> Result<Vec<u8>> {
    tracing::debug!("Decoding payload of type: {}", payload.tag());

    match payload {
        ImagePayload::RawBytes(bytes) => Ok(bytes),
        ImagePayload::Base64Text(text) => base64::engine::general_purpose::STANDARD
            .decode(text.as_bytes())
            .map_err(|e| Error::Decode(format!("invalid base64: {}", e))),
        ImagePayload::Stream(mut stream) => drain_stream(stream.as_mut()),
        ImagePayload::Unsupported { tag } => Err(Error::UnsupportedPayloadType(tag)),
    }
}

fn drain_stream(stream: &mut dyn PayloadStream) -> Result<Vec<u8>> {
    if stream.supports_reset() {
        stream
            .reset()
            .map_err(|e| Error::Decode(format!("failed to reset stream: {}", e)))?;
    }

    let mut buffer = Vec::new();
    stream
        .read_to_end(&mut buffer)
        .map_err(|e| Error::Decode(format!("stream read interrupted: {}", e)))?;

    if buffer.is_empty() {
        return Err(Error::Decode("stream produced no data".to_string()));
    }

    Ok(buffer)
}
