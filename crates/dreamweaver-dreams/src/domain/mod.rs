//! Domain model for the Dreams context.

pub mod commands;
pub mod library;
pub mod session;
pub mod text;
pub mod turn;
pub mod world;
