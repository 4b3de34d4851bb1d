//! Process-wide session state: phase, active world, in-flight request.

use std::fmt;

use dreamweaver_core::id::WorldId;
use serde::Serialize;

/// Coarse phase of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Library view, no generation outstanding.
    #[default]
    Idle,
    /// A generation request is outstanding.
    Generating,
    /// The active world's current turn awaits a choice.
    Interactive,
    /// The latest generation attempt failed.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Generating => "generating",
            Self::Interactive => "interactive",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Marker of one generation request. Only the most recently issued token is
/// ever honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Session state owned by the reconciler. Never persisted.
#[derive(Debug, Default)]
pub struct SessionState {
    phase: Phase,
    active_world: Option<WorldId>,
    in_flight: Option<RequestToken>,
    issued: u64,
    storage_warning: Option<String>,
}

impl SessionState {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The world shown in play, if any.
    #[must_use]
    pub fn active_world(&self) -> Option<&WorldId> {
        self.active_world.as_ref()
    }

    /// Warning left by the last failed storage write.
    #[must_use]
    pub fn storage_warning(&self) -> Option<&str> {
        self.storage_warning.as_deref()
    }

    /// Whether `token` is the request currently honored.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.in_flight == Some(token)
    }

    /// Issues a new token, superseding any earlier one.
    pub(crate) fn issue_token(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.in_flight = Some(token);
        token
    }

    /// Makes every outstanding token stale.
    pub(crate) fn invalidate_token(&mut self) {
        self.in_flight = None;
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn activate(&mut self, world_id: WorldId) {
        self.active_world = Some(world_id);
    }

    /// Clears the active world, drops the in-flight request and goes idle.
    pub(crate) fn reset_to_library(&mut self) {
        self.active_world = None;
        self.invalidate_token();
        self.phase = Phase::Idle;
    }

    pub(crate) fn set_storage_warning(&mut self, warning: String) {
        self.storage_warning = Some(warning);
    }

    pub(crate) fn clear_storage_warning(&mut self) {
        self.storage_warning = None;
    }
}
