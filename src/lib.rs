//! memobot - AI assistant glue layer
//!
//! Wires four external capabilities into a linear demo flow: durable
//! key-value memory (SQLite), email notification (SMTP), an n8n workflow
//! webhook, and a text-completion API.
//!
//! # Architecture
//!
//! Each external collaborator sits behind a narrow capability trait
//! (`MessageDelivery`, `WorkflowExecutor`, `TextCompletion`) so the
//! orchestrator depends on contracts, not vendor SDKs. The flow itself is
//! strictly sequential:
//! - Notify (when the task description asks for an email; never fatal)
//! - Query the workflow (one attempt; failure collapses to "no result")
//! - Persist the result, then retrieve it for display
//!
//! Only opening the memory store is fatal to a run.
//!
//! # Modules
//!
//! - `adapters`: External capability integrations (SMTP, n8n, OpenAI)
//! - `core`: Orchestration logic
//! - `domain`: Data structures (Task, RunReport, NotificationMessage)
//! - `memory`: SQLite-backed append-only key-value store
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Run the demo flow end to end
//! memobot run
//!
//! # Inspect stored memory
//! memobot memory get ai_advancements
//!
//! # One-shot text completion
//! memobot ask "What are the latest advancements in AI?"
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod memory;

// Re-export main types at crate root for convenience
pub use crate::core::Orchestrator;
pub use adapters::{MessageDelivery, TextCompletion, WorkflowExecutor};
pub use domain::{NotificationMessage, RunReport, SendOutcome, Task};
pub use memory::{MemoryRecord, MemoryStore, StoreError};
