//! Test generators: scripted and failing generator ports.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use dreamweaver_core::error::GenerationError;
use dreamweaver_core::generator::{GeneratedScene, ImageGenerator, ImagePayload, NarrativeGenerator};

/// Builds a recognisable scene: description `"Scene {n}"`, prompt
/// `"Prompt {n}"` and options `"Option {n}a"`, `"Option {n}b"`.
#[must_use]
pub fn sample_scene(n: u32) -> GeneratedScene {
    GeneratedScene {
        scene_description: format!("Scene {n}"),
        image_prompt: format!("Prompt {n}"),
        options: vec![format!("Option {n}a"), format!("Option {n}b")],
    }
}

/// A narrative generator that answers with a predetermined sequence of
/// scenes and records every `(context, player_input)` it was called with.
/// Fails with `InvalidResponse` once the script is exhausted.
#[derive(Debug)]
pub struct ScriptedNarrative {
    scenes: Mutex<VecDeque<GeneratedScene>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedNarrative {
    /// Create a generator that returns `scenes` in order.
    #[must_use]
    pub fn new(scenes: Vec<GeneratedScene>) -> Self {
        Self {
            scenes: Mutex::new(scenes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every call made so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrativeGenerator for ScriptedNarrative {
    async fn generate(
        &self,
        context: &str,
        player_input: &str,
    ) -> Result<GeneratedScene, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((context.to_owned(), player_input.to_owned()));
        self.scenes
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GenerationError::InvalidResponse("narrative script exhausted".into()))
    }
}

/// An image generator that always returns the same payload (or none) and
/// records the prompts it receives.
#[derive(Debug)]
pub struct StaticImage {
    payload: Option<ImagePayload>,
    prompts: Mutex<Vec<String>>,
}

impl StaticImage {
    /// Always answers with `data` as the base64 payload.
    #[must_use]
    pub fn some(data: &str) -> Self {
        Self {
            payload: Some(ImagePayload(data.to_owned())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with no image.
    #[must_use]
    pub fn none() -> Self {
        Self {
            payload: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the prompts received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StaticImage {
    async fn generate(&self, prompt: &str) -> Result<Option<ImagePayload>, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        Ok(self.payload.clone())
    }
}

/// A narrative generator that always fails.
#[derive(Debug)]
pub struct FailingNarrative;

#[async_trait]
impl NarrativeGenerator for FailingNarrative {
    async fn generate(
        &self,
        _context: &str,
        _player_input: &str,
    ) -> Result<GeneratedScene, GenerationError> {
        Err(GenerationError::Request("connection refused".into()))
    }
}

/// An image generator that always fails.
#[derive(Debug)]
pub struct FailingImage;

#[async_trait]
impl ImageGenerator for FailingImage {
    async fn generate(&self, _prompt: &str) -> Result<Option<ImagePayload>, GenerationError> {
        Err(GenerationError::Http {
            status: 503,
            message: "image backend unavailable".into(),
        })
    }
}
