//! Domain error types.

use thiserror::Error;

use crate::id::WorldId;

/// Failure reported by a narrative or image generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request could not be sent or the connection failed.
    #[error("generator request failed: {0}")]
    Request(String),

    /// The generator answered with a non-success HTTP status.
    #[error("generator returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// The generator answered but the payload could not be understood.
    #[error("invalid generator response: {0}")]
    InvalidResponse(String),
}

/// Failure reported by a storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// The serialized collection does not fit in the available space.
    #[error("storage capacity exceeded: {attempted} bytes attempted, limit is {limit} bytes")]
    CapacityExceeded {
        /// Maximum number of bytes the store accepts.
        limit: usize,
        /// Size of the rejected write.
        attempted: usize,
    },

    /// The collection could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No world with this identifier exists in the library.
    #[error("world not found: {0}")]
    WorldNotFound(WorldId),

    /// The intent is not valid in the current session phase.
    #[error("{command} is not allowed while {phase}")]
    InvalidTransition {
        /// The rejected intent.
        command: &'static str,
        /// The phase the session was in.
        phase: String,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A generator call failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
