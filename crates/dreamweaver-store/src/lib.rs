//! Storage adapters implementing the `WorldStorage` port.

pub mod file_storage;
pub mod memory_storage;

pub use file_storage::FileWorldStorage;
pub use memory_storage::MemoryWorldStorage;
