//! Image payload normalization and validation
//!
//! Turns a provider response of variable shape into validated image bytes:
//! extract the first inline payload, decode whichever representation it uses,
//! then gate the result on a PNG/JPEG signature.

pub mod decode;
pub mod extract;
pub mod payload;
pub mod signature;

pub use decode::decode_payload;
pub use extract::extract_payload;
pub use payload::{ForwardOnly, ImagePayload, PayloadStream};
pub use signature::{detect_format, validate_image, ImageBytes, ImageFormat};

use crate::ai::response::ProviderResponse;
use crate::Result;
use base64::Engine as _;

/// Run extraction, decoding and signature validation in order.
pub fn normalize(response: ProviderResponse) -> Result<ImageBytes> {
    let inline = extract_payload(response)?;
    if let Some(mime_type) = &inline.mime_type {
        tracing::debug!("Provider reported mime_type: {}", mime_type);
    }

    let bytes = decode_payload(inline.payload)?;
    tracing::info!("Got {} bytes", bytes.len());

    validate_image(bytes)
}

/// Base64 for transport.
pub fn encode(image: &ImageBytes) -> String {
    base64::engine::general_purpose::STANDARD.encode(image.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::response::Part;
    use crate::Error;
    use base64::Engine as _;
    use std::io::Cursor;

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_normalize_raw_png() {
        let image = normalize(ProviderResponse::from_payload(ImagePayload::RawBytes(
            PNG.to_vec(),
        )))
        .unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.as_bytes(), PNG);
    }

    #[test]
    fn test_normalize_each_representation_agrees() {
        let b64 = base64::engine::general_purpose::STANDARD.encode(PNG);
        let payloads = vec![
            ImagePayload::RawBytes(PNG.to_vec()),
            ImagePayload::Base64Text(b64),
            ImagePayload::stream(Cursor::new(PNG.to_vec())),
        ];

        for payload in payloads {
            let image = normalize(ProviderResponse::from_payload(payload)).unwrap();
            assert_eq!(image.into_inner(), PNG.to_vec());
        }
    }

    #[test]
    fn test_normalize_stops_at_first_failure() {
        let response = ProviderResponse::from_parts(vec![
            Part::inline(ImagePayload::Base64Text("***".to_string())),
            Part::inline(ImagePayload::RawBytes(PNG.to_vec())),
        ]);
        let err = normalize(response).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decoded_non_image_is_rejected() {
        let b64 = base64::engine::general_purpose::STANDARD.encode([0x00, 0x00, 0x00, 0x01]);
        let err = normalize(ProviderResponse::from_payload(ImagePayload::Base64Text(b64)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidImageFormat));
    }

    #[test]
    fn test_encode_round_trips() {
        let image = validate_image(PNG.to_vec()).unwrap();
        let encoded = encode(&image);
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, PNG);
    }
}
