//! Linear task orchestrator.
//!
//! Drives one task end to end: notify decision, workflow query, persist,
//! retrieve. Only store access failures propagate; notification and
//! workflow failures degrade to a logged message and an absent result so
//! the run always reaches shutdown.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::adapters::{MessageDelivery, WorkflowExecutor};
use crate::domain::{RunReport, SendOutcome, Task};
use crate::memory::MemoryStore;

/// Sequential driver over the capability adapters and the memory store.
///
/// Owns the store handle for its lifetime; the underlying connection is
/// released when the orchestrator is dropped, on every exit path.
pub struct Orchestrator {
    store: MemoryStore,
    notifier: Box<dyn MessageDelivery>,
    workflow: Box<dyn WorkflowExecutor>,
}

impl Orchestrator {
    pub fn new(
        store: MemoryStore,
        notifier: Box<dyn MessageDelivery>,
        workflow: Box<dyn WorkflowExecutor>,
    ) -> Self {
        Self {
            store,
            notifier,
            workflow,
        }
    }

    /// Execute a task end to end and report what happened.
    #[instrument(skip(self, task), fields(task = %task.description))]
    pub async fn run_task(&self, task: &Task) -> Result<RunReport> {
        let mut report = RunReport::new();
        info!(run_id = %report.run_id, "Starting task run");

        // Notify decision: keyword match on the task description.
        if task.wants_notification() {
            report.notification = Some(self.notify(task).await);
        }

        // Query the workflow; an absent result is a normal outcome and the
        // run proceeds straight to retrieve.
        if let Some(result) = self.workflow.invoke(&task.query).await {
            info!(workflow = self.workflow.name(), "Workflow returned a result");
            self.persist(&task.memory_key, &result)?;
            report.workflow_result = Some(result);
        }

        report.retrieved = self.retrieve(&task.memory_key)?;

        info!(run_id = %report.run_id, "Task run completed");
        Ok(report.finish())
    }

    /// Send the task's notification. Failures are logged, never fatal.
    async fn notify(&self, task: &Task) -> SendOutcome {
        match self.notifier.deliver(&task.notification).await {
            Ok(token) => {
                info!(
                    transport = self.notifier.name(),
                    token = %token,
                    "Notification delivered"
                );
                SendOutcome::Delivered(token)
            }
            Err(e) => {
                warn!(
                    transport = self.notifier.name(),
                    error = %e,
                    "Notification failed, continuing"
                );
                SendOutcome::Failed(e.to_string())
            }
        }
    }

    /// Serialize a workflow result and append it to memory.
    fn persist(&self, key: &str, result: &Value) -> Result<()> {
        let serialized =
            serde_json::to_string(result).context("Failed to serialize workflow result")?;
        self.store
            .save(key, &serialized)
            .with_context(|| format!("Failed to persist result under key '{}'", key))?;

        info!(%key, "Workflow result persisted");
        Ok(())
    }

    /// Load and deserialize the stored value for `key`. Absence is a
    /// normal terminal outcome, not an error.
    fn retrieve(&self, key: &str) -> Result<Option<Value>> {
        let Some(raw) = self
            .store
            .load(key)
            .with_context(|| format!("Failed to read key '{}'", key))?
        else {
            info!(%key, "No stored value found");
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Stored value under '{}' is not valid JSON", key))?;
        Ok(Some(value))
    }

    /// Access the underlying store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::domain::NotificationMessage;

    struct NullNotifier;

    #[async_trait]
    impl MessageDelivery for NullNotifier {
        fn name(&self) -> &str {
            "null"
        }

        async fn deliver(&self, _message: &NotificationMessage) -> Result<String> {
            Ok("ok".to_string())
        }
    }

    struct NullWorkflow;

    #[async_trait]
    impl WorkflowExecutor for NullWorkflow {
        fn name(&self) -> &str {
            "null"
        }

        async fn invoke(&self, _query: &str) -> Option<Value> {
            None
        }
    }

    #[tokio::test]
    async fn test_retrieve_missing_key_is_none() {
        let orchestrator = Orchestrator::new(
            MemoryStore::open_in_memory().unwrap(),
            Box::new(NullNotifier),
            Box::new(NullWorkflow),
        );

        assert_eq!(orchestrator.retrieve("nonexistent").unwrap(), None);
    }

    #[tokio::test]
    async fn test_persist_then_retrieve_round_trip() {
        let orchestrator = Orchestrator::new(
            MemoryStore::open_in_memory().unwrap(),
            Box::new(NullNotifier),
            Box::new(NullWorkflow),
        );

        let value = serde_json::json!({"summary": "X"});
        orchestrator.persist("k", &value).unwrap();

        assert_eq!(orchestrator.retrieve("k").unwrap(), Some(value));
    }
}
