//! Image generation service backed by Gemini
//!
//! Accepts a prompt and an aspect-ratio hint, makes a single provider call,
//! and normalizes whatever payload shape comes back into a validated,
//! base64-encoded PNG or JPEG.

pub mod ai;
pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod server;

pub use error::{Error, ErrorKind, Result};
