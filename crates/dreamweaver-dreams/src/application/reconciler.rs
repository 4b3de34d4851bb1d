//! The turn/world reconciler.
//!
//! Owns the world library and the session state. Generating intents are split
//! into `begin_*` (validate, issue a request token, enter `Generating`) and
//! [`Reconciler::resolve`] (compare tokens, then commit, fail, or discard).
//! Only the most recently issued token is honored; every committing mutation
//! writes the full library immediately.

use std::sync::Arc;

use dreamweaver_core::clock::Clock;
use dreamweaver_core::command::Command;
use dreamweaver_core::error::{DomainError, GenerationError};
use dreamweaver_core::id::{IdGenerator, TurnId, WorldId};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::generation::{
    GeneratedTurn, Generators, PendingGeneration, PendingRequest,
};
use crate::application::persistence::WorldPersistence;
use crate::application::prompts::{NEW_DREAM_CONTEXT, choice_context};
use crate::domain::commands::{Choose, DeleteWorld, LoadWorld, ReturnToLibrary, StartDream};
use crate::domain::library::WorldLibrary;
use crate::domain::session::{Phase, SessionState};
use crate::domain::turn::Turn;
use crate::domain::world::World;

/// Generic message shown when a generation attempt fails.
pub const GENERATION_FAILED_MESSAGE: &str =
    "The dream could not be sustained. Return to the library and try again.";

/// How a generation request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The result was merged into this world and persisted.
    Committed(WorldId),
    /// The request had been superseded; nothing changed.
    Discarded,
    /// The request was current but a generator failed; the session is now
    /// `Failed` and no world was touched.
    Failed(GenerationError),
}

/// State machine driving worlds through generation and persistence.
pub struct Reconciler {
    library: WorldLibrary,
    session: SessionState,
    persistence: WorldPersistence,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Reconciler {
    /// Loads the saved library and starts an idle session.
    pub async fn open(
        persistence: WorldPersistence,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let library = persistence.load().await;
        info!(worlds = library.len(), "world library opened");
        Self {
            library,
            session: SessionState::default(),
            persistence,
            clock,
            ids,
        }
    }

    /// All worlds, most recent first.
    #[must_use]
    pub fn library(&self) -> &WorldLibrary {
        &self.library
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The world currently in play, if any.
    #[must_use]
    pub fn active_world(&self) -> Option<&World> {
        self.session
            .active_world()
            .and_then(|world_id| self.library.get(world_id))
    }

    /// Validates a `StartDream` intent and issues its request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` outside `Idle` and
    /// `DomainError::Validation` for a blank seed. State is unchanged on error.
    pub fn begin_start_dream(
        &mut self,
        command: &StartDream,
    ) -> Result<PendingGeneration, DomainError> {
        self.require_phase(command, Phase::Idle)?;
        if command.seed_text.trim().is_empty() {
            return Err(DomainError::Validation(
                "seed text must not be empty".into(),
            ));
        }

        let token = self.session.issue_token();
        self.session.enter(Phase::Generating);
        info!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            token = token.value(),
            "dream generation requested"
        );

        Ok(PendingGeneration {
            token,
            correlation_id: command.correlation_id(),
            request: PendingRequest::NewWorld {
                seed_text: command.seed_text.clone(),
            },
            context: NEW_DREAM_CONTEXT.to_owned(),
            player_input: command.seed_text.clone(),
        })
    }

    /// Validates a `Choose` intent against the active world and issues its
    /// request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` outside `Interactive`,
    /// `DomainError::Validation` for a blank option or a world without an
    /// active turn, and `DomainError::WorldNotFound` if the active world no
    /// longer exists. State is unchanged on error.
    pub fn begin_choose(&mut self, command: &Choose) -> Result<PendingGeneration, DomainError> {
        self.require_phase(command, Phase::Interactive)?;
        if command.option.trim().is_empty() {
            return Err(DomainError::Validation("option must not be empty".into()));
        }

        let (world_id, from_turn, context) = {
            let world_id = self
                .session
                .active_world()
                .ok_or_else(|| DomainError::Validation("no active world".into()))?;
            let world = self
                .library
                .get(world_id)
                .ok_or_else(|| DomainError::WorldNotFound(world_id.clone()))?;
            let current = world.current_turn().ok_or_else(|| {
                DomainError::Validation(format!("world {world_id} has no active turn"))
            })?;
            (
                world_id.clone(),
                current.id().clone(),
                choice_context(current.scene_description(), &command.option),
            )
        };

        let token = self.session.issue_token();
        self.session.enter(Phase::Generating);
        info!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            %world_id,
            token = token.value(),
            "next turn requested"
        );

        Ok(PendingGeneration {
            token,
            correlation_id: command.correlation_id(),
            request: PendingRequest::NextTurn {
                world_id,
                from_turn,
                choice: command.option.clone(),
            },
            context,
            player_input: command.option.clone(),
        })
    }

    /// Merges the outcome of `pending` into the library.
    ///
    /// A superseded request is discarded without touching any state,
    /// regardless of whether it succeeded.
    pub async fn resolve(
        &mut self,
        pending: PendingGeneration,
        outcome: Result<GeneratedTurn, GenerationError>,
    ) -> Resolution {
        if !self.session.is_current(pending.token) {
            debug!(
                correlation_id = %pending.correlation_id,
                token = pending.token.value(),
                "discarding superseded generation result"
            );
            return Resolution::Discarded;
        }
        self.session.invalidate_token();

        let generated = match outcome {
            Ok(generated) => generated,
            Err(error) => {
                warn!(correlation_id = %pending.correlation_id, %error, "generation failed");
                self.session.enter(Phase::Failed);
                return Resolution::Failed(error);
            }
        };

        match pending.request {
            PendingRequest::NewWorld { seed_text } => {
                self.commit_new_world(pending.correlation_id, &seed_text, generated)
                    .await
            }
            PendingRequest::NextTurn {
                world_id,
                from_turn,
                choice,
            } => {
                self.commit_next_turn(pending.correlation_id, world_id, from_turn, &choice, generated)
                    .await
            }
        }
    }

    /// Runs the generators for `pending` and resolves the result.
    pub async fn drive(&mut self, pending: PendingGeneration, generators: &Generators) -> Resolution {
        let outcome = generators.run(&pending).await;
        self.resolve(pending, outcome).await
    }

    /// Begins and drives a `StartDream` intent.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Reconciler::begin_start_dream`].
    pub async fn start_dream(
        &mut self,
        command: &StartDream,
        generators: &Generators,
    ) -> Result<Resolution, DomainError> {
        let pending = self.begin_start_dream(command)?;
        Ok(self.drive(pending, generators).await)
    }

    /// Begins and drives a `Choose` intent.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Reconciler::begin_choose`].
    pub async fn choose(
        &mut self,
        command: &Choose,
        generators: &Generators,
    ) -> Result<Resolution, DomainError> {
        let pending = self.begin_choose(command)?;
        Ok(self.drive(pending, generators).await)
    }

    /// Makes a saved world active. Any outstanding generation becomes stale.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WorldNotFound` if no such world exists; the
    /// session is unchanged in that case.
    pub fn load_world(&mut self, command: &LoadWorld) -> Result<(), DomainError> {
        if !self.library.contains(&command.world_id) {
            return Err(DomainError::WorldNotFound(command.world_id.clone()));
        }

        self.session.invalidate_token();
        self.session.activate(command.world_id.clone());
        self.session.enter(Phase::Interactive);
        info!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            world_id = %command.world_id,
            "world loaded"
        );
        Ok(())
    }

    /// Deletes a world and persists the library. Deleting the active world
    /// returns the session to the library.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WorldNotFound` if no such world exists; nothing
    /// is written in that case.
    pub async fn delete_world(&mut self, command: &DeleteWorld) -> Result<(), DomainError> {
        let mut library = self.library.clone();
        if library.remove(&command.world_id).is_none() {
            return Err(DomainError::WorldNotFound(command.world_id.clone()));
        }

        self.commit(library).await;
        if self.session.active_world() == Some(&command.world_id) {
            self.session.reset_to_library();
        }
        info!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            world_id = %command.world_id,
            "world deleted"
        );
        Ok(())
    }

    /// Leaves play: clears the active world, drops any outstanding
    /// generation and goes idle.
    pub fn return_to_library(&mut self, command: &ReturnToLibrary) {
        self.session.reset_to_library();
        info!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            "returned to library"
        );
    }

    /// Clears the storage warning after the user has seen it.
    pub fn dismiss_storage_warning(&mut self) {
        self.session.clear_storage_warning();
    }

    fn require_phase<C: Command>(&self, command: &C, allowed: Phase) -> Result<(), DomainError> {
        let phase = self.session.phase();
        if phase == allowed {
            return Ok(());
        }
        debug!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            %phase,
            "intent rejected in current phase"
        );
        Err(DomainError::InvalidTransition {
            command: command.command_type(),
            phase: phase.to_string(),
        })
    }

    async fn commit_new_world(
        &mut self,
        correlation_id: Uuid,
        seed_text: &str,
        generated: GeneratedTurn,
    ) -> Resolution {
        let now = self.clock.now();
        let world_id = self.ids.world_id();
        let opening = Turn::from_generation(self.ids.turn_id(), generated.scene, generated.image);
        let world = World::begin(world_id.clone(), seed_text, opening, now);

        let mut library = self.library.clone();
        library.move_to_front(world);
        self.commit(library).await;

        self.session.activate(world_id.clone());
        self.session.enter(Phase::Interactive);
        info!(%correlation_id, %world_id, "world created");
        Resolution::Committed(world_id)
    }

    async fn commit_next_turn(
        &mut self,
        correlation_id: Uuid,
        world_id: WorldId,
        from_turn: TurnId,
        choice: &str,
        generated: GeneratedTurn,
    ) -> Resolution {
        let Some(mut world) = self.library.get(&world_id).cloned() else {
            debug!(%correlation_id, %world_id, "world vanished before its turn resolved");
            self.session.reset_to_library();
            return Resolution::Discarded;
        };
        if world.current_turn().map(Turn::id) != Some(&from_turn) {
            debug!(%correlation_id, %world_id, "active turn changed before resolution");
            self.session.enter(Phase::Interactive);
            return Resolution::Discarded;
        }

        let next = Turn::from_generation(self.ids.turn_id(), generated.scene, generated.image);
        if let Err(error) = world.advance(choice, next, self.clock.now()) {
            debug!(%correlation_id, %world_id, %error, "turn could not be advanced");
            self.session.enter(Phase::Interactive);
            return Resolution::Discarded;
        }

        let turns = world.turn_count();
        let mut library = self.library.clone();
        library.move_to_front(world);
        self.commit(library).await;

        self.session.enter(Phase::Interactive);
        info!(%correlation_id, %world_id, turns, "turn advanced");
        Resolution::Committed(world_id)
    }

    /// Persists `library` and adopts it in memory whether or not the write
    /// succeeded. A failed write leaves a storage warning on the session.
    async fn commit(&mut self, library: WorldLibrary) {
        let result = self.persistence.save(&library).await;
        self.library = library;
        match result {
            Ok(()) => self.session.clear_storage_warning(),
            Err(error) => {
                warn!(%error, "failed to persist worlds, continuing in memory");
                self.session.set_storage_warning(format!(
                    "Your dreams may not be saved ({error}). Consider deleting old dreams."
                ));
            }
        }
    }
}
