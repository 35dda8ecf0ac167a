//! n8n workflow webhook client.
//!
//! Endpoint: POST to the configured webhook URL with `{"query": <string>}`.
//! Any JSON response shape is accepted and passed through verbatim.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use super::WorkflowExecutor;

/// Client for a hosted n8n workflow webhook.
pub struct N8nClient {
    /// Webhook URL; when absent, invocations short-circuit without I/O
    webhook_url: Option<String>,
    /// HTTP client
    client: reqwest::Client,
}

/// Payload posted to the webhook.
#[derive(Debug, Serialize)]
struct QueryPayload<'a> {
    query: &'a str,
}

impl N8nClient {
    /// Create a client. An empty URL counts as unconfigured.
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url: webhook_url.filter(|url| !url.trim().is_empty()),
            client: reqwest::Client::new(),
        }
    }

    /// Create from the `N8N_WEBHOOK_URL` environment variable.
    pub fn from_env() -> Self {
        Self::new(std::env::var("N8N_WEBHOOK_URL").ok())
    }

    /// Whether a webhook URL is configured.
    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn post_query(&self, url: &str, query: &str) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .json(&QueryPayload { query })
            .send()
            .await
            .context("Failed to reach n8n webhook")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("n8n webhook error ({}): {}", status, text);
        }

        response
            .json()
            .await
            .context("Failed to parse n8n response as JSON")
    }
}

#[async_trait]
impl WorkflowExecutor for N8nClient {
    fn name(&self) -> &str {
        "n8n"
    }

    async fn invoke(&self, query: &str) -> Option<Value> {
        let Some(url) = self.webhook_url.as_deref() else {
            warn!("N8N_WEBHOOK_URL not configured, skipping workflow call");
            return None;
        };

        match self.post_query(url, query).await {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, "n8n workflow call failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_invoke_short_circuits() {
        let client = N8nClient::new(None);
        assert!(!client.is_configured());
        assert_eq!(client.invoke("anything").await, None);
    }

    #[tokio::test]
    async fn test_empty_url_counts_as_unconfigured() {
        let client = N8nClient::new(Some("   ".to_string()));
        assert!(!client.is_configured());
        assert_eq!(client.invoke("anything").await, None);
    }
}
