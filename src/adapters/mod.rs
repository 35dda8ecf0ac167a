//! Capability adapters for external services.
//!
//! Each external collaborator is represented as a narrow trait so the
//! orchestrator depends on capability contracts rather than concrete
//! vendor SDKs, and tests can substitute mocks.

pub mod email;
pub mod n8n;
pub mod openai;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::NotificationMessage;

// Re-export the concrete adapters
pub use email::{SmtpConfig, SmtpNotifier};
pub use n8n::N8nClient;
pub use openai::OpenAiClient;

/// Fire-and-forget message delivery.
#[async_trait]
pub trait MessageDelivery: Send + Sync {
    /// Transport name for logs
    fn name(&self) -> &str;

    /// Attempt delivery of a message; returns a transport-specific
    /// confirmation token on success.
    async fn deliver(&self, message: &NotificationMessage) -> Result<String>;
}

/// Synchronous request/response bridge to a hosted automation workflow.
#[async_trait]
pub trait WorkflowExecutor: Send + Sync {
    /// Engine name for logs
    fn name(&self) -> &str;

    /// Invoke the workflow with a query, one attempt only. Any failure
    /// (missing configuration, network error, bad response) is logged by
    /// the implementation and collapses to `None`.
    async fn invoke(&self, query: &str) -> Option<Value>;
}

/// Opaque text-completion capability.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Complete a prompt, returning the generated text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
