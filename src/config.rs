//! Process configuration, read from the environment.
//!
//! All values are optional at load time. A missing webhook URL skips the
//! workflow call; missing mail credentials surface as a transport-level
//! failure caught by the orchestrator. Only the database path always
//! resolves, falling back to `~/.memobot/memory.db`.

use std::path::PathBuf;

use crate::adapters::SmtpConfig;

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_N8N_WEBHOOK_URL: &str = "N8N_WEBHOOK_URL";
pub const ENV_EMAIL_USER: &str = "EMAIL_USER";
pub const ENV_EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
pub const ENV_SMTP_HOST: &str = "SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";
pub const ENV_NOTIFY_TO: &str = "NOTIFY_TO";
pub const ENV_DB_PATH: &str = "MEMOBOT_DB";

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub n8n_webhook_url: Option<String>,
    pub email_user: Option<String>,
    pub email_password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Notification recipient; defaults to the sender account
    pub notify_to: Option<String>,
    pub db_path: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        let email_user = read_var(ENV_EMAIL_USER);
        let notify_to = read_var(ENV_NOTIFY_TO).or_else(|| email_user.clone());

        Self {
            openai_api_key: read_var(ENV_OPENAI_API_KEY),
            n8n_webhook_url: read_var(ENV_N8N_WEBHOOK_URL),
            email_password: read_var(ENV_EMAIL_PASSWORD),
            smtp_host: read_var(ENV_SMTP_HOST).unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: read_var(ENV_SMTP_PORT)
                .and_then(|port| port.parse().ok())
                .unwrap_or(587),
            db_path: read_var(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            email_user,
            notify_to,
        }
    }

    /// SMTP configuration for the notifier. Unset credentials come through
    /// as empty strings and fail at the transport, where the orchestrator
    /// catches them.
    pub fn smtp(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            user: self.email_user.clone().unwrap_or_default(),
            password: self.email_password.clone().unwrap_or_default(),
            display_name: None,
        }
    }
}

/// Default database location (~/.memobot/memory.db, or the working
/// directory when no home directory can be determined).
fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".memobot").join("memory.db"))
        .unwrap_or_else(|| PathBuf::from("memory.db"))
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
