//! SMTP notification transport (async lettre).
//!
//! One message per call: recipient, subject, body. No retry, no queueing,
//! no delivery confirmation polling.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::NotificationMessage;

use super::MessageDelivery;

/// SMTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Sender account identity; also used as the from address
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SmtpConfig {
    /// Gmail STARTTLS defaults for the given account.
    pub fn gmail(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            user: user.into(),
            password: password.into(),
            display_name: None,
        }
    }
}

/// Email notifier over STARTTLS SMTP.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn from_mailbox(&self) -> Result<Mailbox> {
        let name = self.config.display_name.as_deref().unwrap_or("memobot");
        format!("{} <{}>", name, self.config.user)
            .parse()
            .with_context(|| format!("Invalid sender address: {}", self.config.user))
    }
}

#[async_trait]
impl MessageDelivery for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn deliver(&self, message: &NotificationMessage) -> Result<String> {
        let to: Mailbox = message
            .recipient
            .parse()
            .with_context(|| format!("Invalid recipient: {}", message.recipient))?;

        let email = Message::builder()
            .from(self.from_mailbox()?)
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .context("Failed to build email")?;

        let creds = Credentials::new(self.config.user.clone(), self.config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .with_context(|| format!("Failed to create SMTP relay for {}", self.config.host))?
            .port(self.config.port)
            .credentials(creds)
            .build();

        let response = mailer.send(email).await.context("SMTP send failed")?;

        info!(recipient = %message.recipient, "Email sent");
        Ok(response.code().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gmail_defaults() {
        let config = SmtpConfig::gmail("bot@gmail.com", "secret");
        assert_eq!(config.host, "smtp.gmail.com");
        assert_eq!(config.port, 587);
    }

    #[test]
    fn test_from_mailbox_uses_display_name() {
        let mut config = SmtpConfig::gmail("bot@gmail.com", "secret");
        config.display_name = Some("Memo Bot".to_string());

        let notifier = SmtpNotifier::new(config);
        let mailbox = notifier.from_mailbox().unwrap();

        assert_eq!(mailbox.name.as_deref(), Some("Memo Bot"));
        assert_eq!(mailbox.email.to_string(), "bot@gmail.com");
    }

    #[test]
    fn test_from_mailbox_rejects_empty_user() {
        let notifier = SmtpNotifier::new(SmtpConfig::gmail("", ""));
        assert!(notifier.from_mailbox().is_err());
    }
}
