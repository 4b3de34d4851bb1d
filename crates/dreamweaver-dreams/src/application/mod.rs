//! Application layer for the Dreams context.

pub mod generation;
pub mod persistence;
pub mod prompts;
pub mod query_handlers;
pub mod reconciler;
