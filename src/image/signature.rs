use crate::{Error, Result};

/// Image formats the service is willing to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Detect the format from leading magic bytes only.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    match bytes {
        [0x89, 0x50, 0x4E, 0x47, ..] => Some(ImageFormat::Png),
        [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
        _ => None,
    }
}

/// Decoded bytes that start with a known image signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBytes {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl ImageBytes {
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

/// Gate decoded bytes on a PNG or JPEG signature. No content is parsed.
pub fn validate_image(bytes: Vec<u8>) -> Result<ImageBytes> {
    match detect_format(&bytes) {
        Some(format) => Ok(ImageBytes { bytes, format }),
        None => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?})",
                &bytes[..bytes.len().min(4)]
            );
            Err(Error::InvalidImageFormat)
        }
    }
}
