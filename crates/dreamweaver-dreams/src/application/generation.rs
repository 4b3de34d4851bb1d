//! Generation requests and the chained narrative → image call.
//!
//! A `PendingGeneration` is everything needed to run a request without
//! borrowing the reconciler, so a host can release its lock while the
//! generators run and other intents may interleave.

use std::sync::Arc;

use dreamweaver_core::error::GenerationError;
use dreamweaver_core::generator::{GeneratedScene, ImageGenerator, ImagePayload, NarrativeGenerator};
use dreamweaver_core::id::{TurnId, WorldId};
use tracing::debug;
use uuid::Uuid;

use crate::domain::session::RequestToken;

/// What a generation request will produce once it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    /// The opening turn of a new world.
    NewWorld {
        /// The player's seed text.
        seed_text: String,
    },
    /// The turn following a choice in an existing world.
    NextTurn {
        /// World being continued.
        world_id: WorldId,
        /// Active turn at the time of the choice.
        from_turn: TurnId,
        /// The option taken.
        choice: String,
    },
}

/// An issued, not yet resolved, generation request.
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    pub(crate) token: RequestToken,
    pub(crate) correlation_id: Uuid,
    pub(crate) request: PendingRequest,
    pub(crate) context: String,
    pub(crate) player_input: String,
}

impl PendingGeneration {
    /// Token identifying this request.
    #[must_use]
    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// Correlation ID of the intent that issued it.
    #[must_use]
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// What the request will produce.
    #[must_use]
    pub fn request(&self) -> &PendingRequest {
        &self.request
    }

    /// Context passed to the narrative generator.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Player input passed to the narrative generator.
    #[must_use]
    pub fn player_input(&self) -> &str {
        &self.player_input
    }
}

/// Output of a successful generation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTurn {
    /// Narrative result.
    pub scene: GeneratedScene,
    /// Image for the scene, if the backend produced one.
    pub image: Option<ImagePayload>,
}

/// The pair of generator ports used to advance a world.
#[derive(Clone)]
pub struct Generators {
    narrative: Arc<dyn NarrativeGenerator>,
    image: Arc<dyn ImageGenerator>,
}

impl Generators {
    /// Bundles the narrative and image generators.
    #[must_use]
    pub fn new(narrative: Arc<dyn NarrativeGenerator>, image: Arc<dyn ImageGenerator>) -> Self {
        Self { narrative, image }
    }

    /// Runs the narrative generator, then the image generator on the
    /// returned prompt. The image call never starts before the narrative
    /// call has succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first `GenerationError` raised by either generator.
    pub async fn run(&self, pending: &PendingGeneration) -> Result<GeneratedTurn, GenerationError> {
        let scene = self
            .narrative
            .generate(&pending.context, &pending.player_input)
            .await?;
        debug!(
            correlation_id = %pending.correlation_id,
            options = scene.options.len(),
            "narrative generated"
        );
        let image = self.image.generate(&scene.image_prompt).await?;
        Ok(GeneratedTurn { scene, image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamweaver_test_support::{
        FailingImage, FailingNarrative, ScriptedNarrative, StaticImage, sample_scene,
    };

    use crate::domain::session::SessionState;

    fn pending() -> PendingGeneration {
        let mut session = SessionState::default();
        PendingGeneration {
            token: session.issue_token(),
            correlation_id: Uuid::new_v4(),
            request: PendingRequest::NewWorld {
                seed_text: "glass desert".to_owned(),
            },
            context: "New Dream Started".to_owned(),
            player_input: "glass desert".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_run_feeds_narrative_prompt_to_image_generator() {
        // Arrange
        let narrative = Arc::new(ScriptedNarrative::new(vec![sample_scene(1)]));
        let image = Arc::new(StaticImage::some("cGl4ZWxz"));
        let generators = Generators::new(narrative.clone(), image.clone());

        // Act
        let generated = generators.run(&pending()).await.unwrap();

        // Assert
        assert_eq!(generated.scene, sample_scene(1));
        assert_eq!(generated.image, Some(ImagePayload("cGl4ZWxz".to_owned())));
        assert_eq!(
            narrative.calls(),
            vec![("New Dream Started".to_owned(), "glass desert".to_owned())]
        );
        assert_eq!(image.prompts(), vec!["Prompt 1".to_owned()]);
    }

    #[tokio::test]
    async fn test_run_tolerates_absent_image() {
        let generators = Generators::new(
            Arc::new(ScriptedNarrative::new(vec![sample_scene(1)])),
            Arc::new(StaticImage::none()),
        );

        let generated = generators.run(&pending()).await.unwrap();

        assert!(generated.image.is_none());
    }

    #[tokio::test]
    async fn test_run_skips_image_when_narrative_fails() {
        // Arrange
        let image = Arc::new(StaticImage::some("unused"));
        let generators = Generators::new(Arc::new(FailingNarrative), image.clone());

        // Act
        let result = generators.run(&pending()).await;

        // Assert
        assert!(matches!(result, Err(GenerationError::Request(_))));
        assert!(image.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_run_reports_image_failure() {
        let generators = Generators::new(
            Arc::new(ScriptedNarrative::new(vec![sample_scene(1)])),
            Arc::new(FailingImage),
        );

        let result = generators.run(&pending()).await;

        assert!(matches!(
            result,
            Err(GenerationError::Http { status: 503, .. })
        ));
    }
}
