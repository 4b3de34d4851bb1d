//! Gemini `generateContent` adapter.
//!
//! [`GeminiClient`] implements both generator ports: the narrative port on the
//! text model with a JSON response schema, and the image port on the image
//! model.

pub mod client;
mod image;
mod narrative;
mod wire;

pub use client::{DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};
