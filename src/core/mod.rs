//! Core orchestration logic.

pub mod orchestrator;

// Re-export commonly used types
pub use orchestrator::Orchestrator;
