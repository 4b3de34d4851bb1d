//! User intents for the Dreams context.

use dreamweaver_core::command::Command;
use dreamweaver_core::id::WorldId;
use uuid::Uuid;

/// Intent to start a new world from a seed.
#[derive(Debug, Clone)]
pub struct StartDream {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Free text describing the setting, character or moment.
    pub seed_text: String,
}

impl Command for StartDream {
    fn command_type(&self) -> &'static str {
        "dreams.start_dream"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Intent to take one of the active turn's options.
#[derive(Debug, Clone)]
pub struct Choose {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The option text.
    pub option: String,
}

impl Command for Choose {
    fn command_type(&self) -> &'static str {
        "dreams.choose"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Intent to resume a saved world.
#[derive(Debug, Clone)]
pub struct LoadWorld {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The world to resume.
    pub world_id: WorldId,
}

impl Command for LoadWorld {
    fn command_type(&self) -> &'static str {
        "dreams.load_world"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Intent to delete a world. Confirmation happens before this is issued.
#[derive(Debug, Clone)]
pub struct DeleteWorld {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The world to delete.
    pub world_id: WorldId,
}

impl Command for DeleteWorld {
    fn command_type(&self) -> &'static str {
        "dreams.delete_world"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Intent to leave play and go back to the library.
#[derive(Debug, Clone)]
pub struct ReturnToLibrary {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ReturnToLibrary {
    fn command_type(&self) -> &'static str {
        "dreams.return_to_library"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
