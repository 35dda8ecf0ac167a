//! Domain types for the memobot glue layer.
//!
//! This module contains the core data structures:
//! - NotificationMessage / SendOutcome: transient notification types
//! - Task: one linear unit of work for the orchestrator
//! - RunReport: what happened during a run

pub mod message;
pub mod report;
pub mod task;

// Re-export commonly used types
pub use message::{NotificationMessage, SendOutcome};
pub use report::RunReport;
pub use task::Task;
