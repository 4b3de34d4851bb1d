//! DreamWeaver Core: shared ports and types.
//!
//! This crate defines the identifiers, error types and infrastructure ports
//! (generators, storage, clock) that the dreams context depends on. It
//! contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod generator;
pub mod id;
pub mod storage;
