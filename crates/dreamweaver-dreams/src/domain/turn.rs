//! A single narrative beat.

use dreamweaver_core::generator::{GeneratedScene, ImagePayload};
use dreamweaver_core::id::TurnId;
use serde::{Deserialize, Serialize};

/// One narrative beat of a world.
///
/// While a turn is its world's active turn it may carry an image and has no
/// recorded choice. Archiving it into history clears the image and records
/// the choice that led to the next turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    id: TurnId,
    scene_description: String,
    #[serde(rename = "imageBase64", default)]
    image: Option<ImagePayload>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(rename = "userChoice", default, skip_serializing_if = "Option::is_none")]
    choice_taken: Option<String>,
}

impl Turn {
    /// Builds an active turn from a generator result. The image prompt is
    /// not kept.
    #[must_use]
    pub fn from_generation(id: TurnId, scene: GeneratedScene, image: Option<ImagePayload>) -> Self {
        Self {
            id,
            scene_description: scene.scene_description,
            image,
            options: scene.options,
            choice_taken: None,
        }
    }

    /// Archives this turn: drops its image and records `choice` as the
    /// option that was taken.
    #[must_use]
    pub fn archive(self, choice: impl Into<String>) -> Self {
        Self {
            image: None,
            choice_taken: Some(choice.into()),
            ..self
        }
    }

    /// Turn identifier.
    #[must_use]
    pub fn id(&self) -> &TurnId {
        &self.id
    }

    /// Scene prose.
    #[must_use]
    pub fn scene_description(&self) -> &str {
        &self.scene_description
    }

    /// Illustration, present only on an active turn that received one.
    #[must_use]
    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    /// Options this turn offered.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The option taken from this turn, once archived.
    #[must_use]
    pub fn choice_taken(&self) -> Option<&str> {
        self.choice_taken.as_deref()
    }

    /// Whether this turn has been archived into history.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.choice_taken.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn active_turn() -> Turn {
        Turn::from_generation(
            TurnId::from(Uuid::from_u128(7)),
            GeneratedScene {
                scene_description: "A door of rain stands open.".to_owned(),
                image_prompt: "rain door, oil painting".to_owned(),
                options: vec!["Step through".to_owned(), "Walk away".to_owned()],
            },
            Some(ImagePayload("aW1n".to_owned())),
        )
    }

    #[test]
    fn test_from_generation_builds_active_turn() {
        let turn = active_turn();

        assert_eq!(turn.scene_description(), "A door of rain stands open.");
        assert_eq!(turn.options(), ["Step through", "Walk away"]);
        assert!(turn.image().is_some());
        assert!(!turn.is_archived());
    }

    #[test]
    fn test_archive_clears_image_and_records_choice() {
        let turn = active_turn().archive("Step through");

        assert!(turn.image().is_none());
        assert_eq!(turn.choice_taken(), Some("Step through"));
        assert!(turn.is_archived());
        assert_eq!(turn.options().len(), 2);
    }

    #[test]
    fn test_active_turn_serializes_without_user_choice_key() {
        let json = serde_json::to_value(active_turn()).unwrap();

        assert_eq!(json["imageBase64"], "aW1n");
        assert_eq!(json["sceneDescription"], "A door of rain stands open.");
        assert!(json.get("userChoice").is_none());
    }

    #[test]
    fn test_archived_turn_serializes_null_image_and_choice() {
        let json = serde_json::to_value(active_turn().archive("Walk away")).unwrap();

        assert!(json["imageBase64"].is_null());
        assert_eq!(json["userChoice"], "Walk away");
    }
}
