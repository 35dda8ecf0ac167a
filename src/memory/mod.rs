//! Durable key-value memory backed by a single SQLite file.

pub mod store;

// Re-export commonly used types
pub use store::{MemoryRecord, MemoryStore, StoreError};
