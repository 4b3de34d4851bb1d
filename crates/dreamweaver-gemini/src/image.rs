//! `ImageGenerator` on the image model.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use tracing::debug;

use dreamweaver_core::error::GenerationError;
use dreamweaver_core::generator::{ImageGenerator, ImagePayload};

use crate::client::GeminiClient;
use crate::wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

fn build_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(prompt.to_owned())],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["IMAGE"]),
            ..GenerationConfig::default()
        }),
    }
}

fn extract_image(response: GenerateContentResponse) -> Result<Option<ImagePayload>, GenerationError> {
    let Some(inline) = response.into_parts().find_map(|part| part.inline_data) else {
        debug!("image response carried no inline data");
        return Ok(None);
    };

    BASE64_STANDARD
        .decode(&inline.data)
        .map_err(|err| GenerationError::InvalidResponse(format!("image data is not base64: {err}")))?;
    Ok(Some(ImagePayload(inline.data)))
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<ImagePayload>, GenerationError> {
        let response = self
            .generate_content(self.image_model(), &build_request(prompt))
            .await?;
        extract_image(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extract_image_takes_first_inline_part() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"Here is your image"},
            {"inlineData":{"mimeType":"image/png","data":"aGVsbG8="}},
            {"inlineData":{"mimeType":"image/png","data":"d29ybGQ="}}
        ]}}]}"#;

        let image = extract_image(response(body)).unwrap();

        assert_eq!(image, Some(ImagePayload("aGVsbG8=".to_owned())));
    }

    #[test]
    fn test_extract_image_without_inline_data_is_absent() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"I cannot draw that"}]}}]}"#;

        let image = extract_image(response(body)).unwrap();

        assert!(image.is_none());
    }

    #[test]
    fn test_extract_image_rejects_invalid_base64() {
        let body = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"@@not base64@@"}}]}}]}"#;

        let result = extract_image(response(body));

        assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
    }

    #[test]
    fn test_request_asks_for_image_modality() {
        let json = serde_json::to_value(build_request("a moth cathedral")).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "a moth cathedral");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
        assert!(json.get("systemInstruction").is_none());
    }
}
