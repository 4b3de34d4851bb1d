//! Shared test doubles for the DreamWeaver interactive fiction engine.

mod clock;
mod generator;
mod ids;
mod storage;

pub use clock::{FixedClock, ManualClock};
pub use generator::{FailingImage, FailingNarrative, ScriptedNarrative, StaticImage, sample_scene};
pub use ids::SequenceIds;
pub use storage::{FailingStorage, RecordingStorage, UnreadableStorage};
