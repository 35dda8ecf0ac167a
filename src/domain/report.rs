//! Run report produced by the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::SendOutcome;

/// Summary of a single orchestrator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier for this run
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished (None while in flight)
    pub completed_at: Option<DateTime<Utc>>,

    /// Outcome of the notify step, if it ran
    pub notification: Option<SendOutcome>,

    /// Raw workflow result, if the workflow produced one
    pub workflow_result: Option<Value>,

    /// Value retrieved from memory at the end of the run
    pub retrieved: Option<Value>,
}

impl RunReport {
    /// Start a fresh report with the current timestamp.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            completed_at: None,
            notification: None,
            workflow_result: None,
            retrieved: None,
        }
    }

    /// Mark the run as finished.
    pub fn finish(mut self) -> Self {
        self.completed_at = Some(Utc::now());
        self
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization() {
        let report = RunReport::new().finish();

        let json = serde_json::to_string(&report).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.run_id, report.run_id);
        assert!(parsed.completed_at.is_some());
        assert!(parsed.retrieved.is_none());
    }
}
