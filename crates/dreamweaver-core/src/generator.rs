//! Generator ports.
//!
//! The narrative and image backends are external collaborators. The dreams
//! context only sees these two traits; adapters live in their own crates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Structured result of one narrative generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedScene {
    /// Prose describing the new scene.
    pub scene_description: String,
    /// Prompt to hand to the image generator.
    pub image_prompt: String,
    /// Choices offered to the player, in display order.
    pub options: Vec<String>,
}

/// Base64-encoded image data returned by an image generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(pub String);

impl ImagePayload {
    /// Returns the base64 data.
    #[must_use]
    pub fn as_base64(&self) -> &str {
        &self.0
    }
}

/// Port for the narrative (text) generator.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Continues the story from `context` given the player's input or choice.
    async fn generate(
        &self,
        context: &str,
        player_input: &str,
    ) -> Result<GeneratedScene, GenerationError>;
}

/// Port for the image generator.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Renders `prompt`. `Ok(None)` means the backend produced no image,
    /// which is tolerated.
    async fn generate(&self, prompt: &str) -> Result<Option<ImagePayload>, GenerationError>;
}
