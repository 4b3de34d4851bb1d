//! Test identifier source.

use std::sync::atomic::{AtomicU64, Ordering};

use dreamweaver_core::id::IdGenerator;
use uuid::Uuid;

/// Mints `Uuid::from_u128(1)`, `Uuid::from_u128(2)`, ... in call order.
#[derive(Debug, Default)]
pub struct SequenceIds {
    next: AtomicU64,
}

impl SequenceIds {
    /// Create a sequence whose first identifier is `Uuid::from_u128(1)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIds {
    fn next_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(u128::from(n))
    }
}
