//! DreamWeaver Dreams bounded context.
//!
//! Responsible for worlds (save slots), their turn history, the session
//! phase, and reconciling asynchronous generation results into the
//! persisted, recency-ordered world library.

pub mod application;
pub mod domain;
