//! Error handling and custom error types
//!
//! Every failure the service can report falls into one of the kinds below.
//! Anything unclassified (transport, JSON envelope) is folded into
//! [`Error::Provider`] with its original message preserved.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Image generation failed: {0}")]
    Provider(String),

    #[error("No content returned")]
    EmptyResponse,

    #[error("No images generated")]
    NoImageFound,

    #[error("Failed to decode image payload: {0}")]
    Decode(String),

    #[error("Unsupported payload type: {0}")]
    UnsupportedPayloadType(String),

    #[error("Returned data is not a valid PNG or JPEG")]
    InvalidImageFormat,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Stable, serializable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ProviderError,
    EmptyResponse,
    NoImageFound,
    DecodeError,
    UnsupportedPayloadType,
    InvalidImageFormat,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Provider(_) | Error::Config(_) => ErrorKind::ProviderError,
            Error::EmptyResponse => ErrorKind::EmptyResponse,
            Error::NoImageFound => ErrorKind::NoImageFound,
            Error::Decode(_) => ErrorKind::DecodeError,
            Error::UnsupportedPayloadType(_) => ErrorKind::UnsupportedPayloadType,
            Error::InvalidImageFormat => ErrorKind::InvalidImageFormat,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Provider(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
