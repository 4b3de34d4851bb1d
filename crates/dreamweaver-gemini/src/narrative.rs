//! `NarrativeGenerator` on the text model.

use async_trait::async_trait;
use serde_json::json;

use dreamweaver_core::error::GenerationError;
use dreamweaver_core::generator::{GeneratedScene, NarrativeGenerator};

use crate::client::GeminiClient;
use crate::wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const STORYTELLER_INSTRUCTION: &str = "You are the narrator of a surreal, dreamlike interactive story. \
Continue the story from the given situation and the player's input. \
Write a vivid scene description of two or three short paragraphs in the second person. \
Provide an image prompt describing the scene visually for an illustrator, with no text in the image. \
Offer between two and four distinct options for what the player may do next.";

fn scene_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sceneDescription": { "type": "STRING" },
            "imagePrompt": { "type": "STRING" },
            "options": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["sceneDescription", "imagePrompt", "options"]
    })
}

fn build_request(context: &str, player_input: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(format!(
            "{context}\n\nPlayer input: {player_input}"
        ))],
        system_instruction: Some(Content::system(STORYTELLER_INSTRUCTION)),
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json"),
            response_schema: Some(scene_schema()),
            ..GenerationConfig::default()
        }),
    }
}

fn parse_scene(response: GenerateContentResponse) -> Result<GeneratedScene, GenerationError> {
    let text = response
        .into_parts()
        .find_map(|part| part.text)
        .ok_or_else(|| GenerationError::InvalidResponse("no text in response".into()))?;

    let scene: GeneratedScene = serde_json::from_str(&text)
        .map_err(|err| GenerationError::InvalidResponse(format!("malformed scene JSON: {err}")))?;

    if scene.scene_description.trim().is_empty() {
        return Err(GenerationError::InvalidResponse(
            "scene description is empty".into(),
        ));
    }
    if scene.options.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "scene offers no options".into(),
        ));
    }
    Ok(scene)
}

#[async_trait]
impl NarrativeGenerator for GeminiClient {
    async fn generate(
        &self,
        context: &str,
        player_input: &str,
    ) -> Result<GeneratedScene, GenerationError> {
        let request = build_request(context, player_input);
        let response = self.generate_content(self.text_model(), &request).await?;
        parse_scene(response)
    }
}
