//! A world: one independent save slot.

use chrono::{DateTime, Utc};
use dreamweaver_core::error::DomainError;
use dreamweaver_core::id::WorldId;
use serde::{Deserialize, Serialize};

use super::text::{preview_from_scene, title_from_seed};
use super::turn::Turn;

/// One playthrough: archived turns, oldest first, plus the active turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    id: WorldId,
    title: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    last_played_at: DateTime<Utc>,
    #[serde(default)]
    history: Vec<Turn>,
    #[serde(default)]
    current_turn: Option<Turn>,
    #[serde(default)]
    preview_text: String,
}

impl World {
    /// Starts a new world from the player's seed and the opening turn.
    #[must_use]
    pub fn begin(id: WorldId, seed_text: &str, opening: Turn, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title_from_seed(seed_text),
            created_at: now,
            last_played_at: now,
            history: Vec::new(),
            preview_text: preview_from_scene(opening.scene_description()),
            current_turn: Some(opening),
        }
    }

    /// Archives the active turn with `choice` and installs `next` as the new
    /// active turn.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the world has no active turn or
    /// `next` is already archived. The world is left untouched in that case.
    pub fn advance(
        &mut self,
        choice: &str,
        next: Turn,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if next.is_archived() {
            return Err(DomainError::Validation(
                "next turn must not carry a recorded choice".into(),
            ));
        }
        let Some(current) = self.current_turn.take() else {
            return Err(DomainError::Validation(format!(
                "world {} has no active turn",
                self.id
            )));
        };

        self.history.push(current.archive(choice));
        self.preview_text = preview_from_scene(next.scene_description());
        self.current_turn = Some(next);
        self.last_played_at = now;
        Ok(())
    }

    /// World identifier.
    #[must_use]
    pub fn id(&self) -> &WorldId {
        &self.id
    }

    /// Title derived from the seed text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// When the world was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When a turn was last committed to the world.
    #[must_use]
    pub fn last_played_at(&self) -> DateTime<Utc> {
        self.last_played_at
    }

    /// Archived turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// The turn awaiting the player's next choice.
    #[must_use]
    pub fn current_turn(&self) -> Option<&Turn> {
        self.current_turn.as_ref()
    }

    /// Short preview of the most recent scene.
    #[must_use]
    pub fn preview_text(&self) -> &str {
        &self.preview_text
    }

    /// Number of turns, archived and active.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.history.len() + usize::from(self.current_turn.is_some())
    }

    /// Checks the turn invariant: every archived turn has a recorded choice
    /// and no image, and the active turn has no recorded choice.
    #[must_use]
    pub fn holds_turn_invariant(&self) -> bool {
        let history_ok = self
            .history
            .iter()
            .all(|turn| turn.is_archived() && turn.image().is_none());
        let current_ok = self
            .current_turn
            .as_ref()
            .is_none_or(|turn| !turn.is_archived());
        history_ok && current_ok
    }
}
