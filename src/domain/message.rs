//! Notification message types.

use serde::{Deserialize, Serialize};

/// A message handed to the delivery transport. Transient: constructed and
/// consumed within a single send, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Outcome of a delivery attempt.
///
/// Delivery failure is logged and carried in the run report; it is never
/// fatal to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum SendOutcome {
    /// Delivered, with a transport-specific confirmation token
    Delivered(String),

    /// Delivery failed with the given reason
    Failed(String),
}

impl SendOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_outcome_serialization() {
        let outcome = SendOutcome::Delivered("250 Ok".to_string());

        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: SendOutcome = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, outcome);
        assert!(parsed.is_delivered());
    }

    #[test]
    fn test_failed_outcome_is_not_delivered() {
        let outcome = SendOutcome::Failed("authentication rejected".to_string());
        assert!(!outcome.is_delivered());
    }
}
