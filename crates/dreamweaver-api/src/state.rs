//! Shared application state.

use std::sync::Arc;

use dreamweaver_dreams::application::generation::Generators;
use dreamweaver_dreams::application::reconciler::Reconciler;
use tokio::sync::Mutex;

/// Application state shared across all request handlers.
///
/// Handlers hold the reconciler lock only to begin or resolve an intent,
/// never while the generators run.
#[derive(Clone)]
pub struct AppState {
    /// The single reconciler owning worlds and session state.
    pub reconciler: Arc<Mutex<Reconciler>>,
    /// Narrative and image generators.
    pub generators: Generators,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(reconciler: Reconciler, generators: Generators) -> Self {
        Self {
            reconciler: Arc::new(Mutex::new(reconciler)),
            generators,
        }
    }
}
