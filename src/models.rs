//! Data models and structures
//!
//! Defines the request/result types exchanged with the service core and the
//! environment-driven configuration.

use crate::error::ErrorKind;
use crate::image::ImageFormat;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ASPECT_RATIO: &str = "16:9";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// A validated generation request. Construction fails for blank prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    aspect_ratio: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, aspect_ratio: impl Into<String>) -> Result<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(Error::InvalidInput("Prompt cannot be empty".to_string()));
        }

        Ok(Self {
            prompt,
            aspect_ratio: aspect_ratio.into(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Passed to the provider verbatim; the provider decides what is valid.
    pub fn aspect_ratio(&self) -> &str {
        &self.aspect_ratio
    }

    /// Prompt prefix safe to put in logs.
    pub fn prompt_preview(&self) -> String {
        self.prompt.chars().take(70).collect()
    }
}

/// A successfully generated, validated image ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub base64: String,
    pub format: ImageFormat,
    pub byte_len: usize,
}

/// Boundary result of one `generate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ServiceResult {
    Success { base64: String },
    Failure { kind: ErrorKind, message: String },
}

impl ServiceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ServiceResult::Success { .. })
    }
}

impl From<Result<GeneratedImage>> for ServiceResult {
    fn from(result: Result<GeneratedImage>) -> Self {
        match result {
            Ok(image) => ServiceResult::Success {
                base64: image.base64,
            },
            Err(e) => ServiceResult::Failure {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(120),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| {
                Error::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
            })?),
            None => defaults.request_timeout,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => defaults.port,
        };

        Ok(Self {
            google_api_key: lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty()),
            model: lookup("GEMINI_IMAGE_MODEL").unwrap_or(defaults.model),
            gemini_base_url: lookup("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            request_timeout,
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    pub fn api_key_set(&self) -> bool {
        self.google_api_key.is_some()
    }
}
