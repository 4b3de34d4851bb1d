//! User intent abstractions.

use uuid::Uuid;

/// Trait that all user intents implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The intent name (for logging).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this intent through generation and persistence.
    fn correlation_id(&self) -> Uuid;
}
