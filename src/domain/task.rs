//! Task definition for an orchestrator run.

use serde::{Deserialize, Serialize};

use super::NotificationMessage;

/// Keyword in the task description that triggers the notify step.
pub const NOTIFY_TRIGGER: &str = "email";

/// One linear unit of work for the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Free-form description; drives the notify decision
    pub description: String,

    /// Message sent when the description asks for an email
    pub notification: NotificationMessage,

    /// Query forwarded to the workflow engine
    pub query: String,

    /// Memory key the workflow result is stored under
    pub memory_key: String,
}

impl Task {
    /// The fixed demo scenario: send a test email, ask the workflow about
    /// AI advancements, persist and retrieve the answer.
    pub fn demo(recipient: impl Into<String>) -> Self {
        Self {
            description: "Send a test email.".to_string(),
            notification: NotificationMessage::new(
                recipient,
                "Test Email",
                "This is a test email from your AI.",
            ),
            query: "What are the latest advancements in AI?".to_string(),
            memory_key: "ai_advancements".to_string(),
        }
    }

    /// Whether the description asks for a notification.
    pub fn wants_notification(&self) -> bool {
        self.description.contains(NOTIFY_TRIGGER)
    }
}
