//! Command-line interface for memobot.
//!
//! Provides commands for running the demo task, inspecting stored memory,
//! one-shot text completion, and showing the resolved configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{N8nClient, OpenAiClient, SmtpNotifier, TextCompletion};
use crate::config::Config;
use crate::core::Orchestrator;
use crate::domain::{SendOutcome, Task};
use crate::memory::MemoryStore;

/// memobot - AI assistant glue: memory, notifications, workflows
#[derive(Parser, Debug)]
#[command(name = "memobot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the demo task end to end
    Run {
        /// Override the task description (drives the notify decision)
        #[arg(short, long)]
        task: Option<String>,
    },

    /// Inspect stored memory
    Memory {
        #[command(subcommand)]
        command: MemoryCommands,
    },

    /// One-shot text completion
    Ask {
        /// Prompt text
        prompt: String,
    },

    /// Show resolved configuration (secrets redacted)
    Config,
}

#[derive(Subcommand, Debug)]
pub enum MemoryCommands {
    /// List recent records, newest first
    List {
        /// Maximum number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show the most recent value for a key
    Get {
        /// Lookup key
        key: String,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = Config::from_env();

        match self.command {
            Commands::Run { task } => run_task(&config, task).await,
            Commands::Memory { command } => memory_command(&config, command),
            Commands::Ask { prompt } => ask(&config, &prompt).await,
            Commands::Config => show_config(&config),
        }
    }
}

async fn run_task(config: &Config, description: Option<String>) -> Result<()> {
    // Store initialization is the only fatal failure; everything after
    // this degrades gracefully.
    let store = MemoryStore::open(&config.db_path).with_context(|| {
        format!("Failed to open memory store at {}", config.db_path.display())
    })?;

    let mut task = Task::demo(config.notify_to.clone().unwrap_or_default());
    if let Some(description) = description {
        task.description = description;
    }

    let orchestrator = Orchestrator::new(
        store,
        Box::new(SmtpNotifier::new(config.smtp())),
        Box::new(N8nClient::new(config.n8n_webhook_url.clone())),
    );

    let report = orchestrator.run_task(&task).await?;

    match &report.notification {
        Some(SendOutcome::Delivered(token)) => println!("Notification delivered ({})", token),
        Some(SendOutcome::Failed(reason)) => println!("Notification failed: {}", reason),
        None => {}
    }
    if let Some(result) = &report.workflow_result {
        println!("Workflow result: {}", result);
    }
    match &report.retrieved {
        Some(value) => println!("Retrieved '{}': {}", task.memory_key, value),
        None => println!("No stored value for '{}'", task.memory_key),
    }

    Ok(())
}

fn memory_command(config: &Config, command: MemoryCommands) -> Result<()> {
    let store = MemoryStore::open(&config.db_path).with_context(|| {
        format!("Failed to open memory store at {}", config.db_path.display())
    })?;

    match command {
        MemoryCommands::List { limit } => {
            let records = store.list(limit)?;
            if records.is_empty() {
                println!("No records stored.");
            }
            for record in records {
                println!(
                    "{:>6}  {}  {}",
                    record.id,
                    record.key,
                    record.value.as_deref().unwrap_or("(null)")
                );
            }
        }
        MemoryCommands::Get { key } => match store.load(&key)? {
            Some(value) => println!("{}", value),
            None => println!("No value stored under '{}'", key),
        },
    }

    Ok(())
}

async fn ask(config: &Config, prompt: &str) -> Result<()> {
    let api_key = config
        .openai_api_key
        .clone()
        .context("OPENAI_API_KEY not set")?;

    let client = OpenAiClient::new(api_key);
    let answer = client.complete(prompt).await?;
    println!("{}", answer);

    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    println!("db_path:         {}", config.db_path.display());
    println!(
        "n8n_webhook_url: {}",
        display_value(config.n8n_webhook_url.as_deref(), false)
    );
    println!(
        "email_user:      {}",
        display_value(config.email_user.as_deref(), false)
    );
    println!(
        "email_password:  {}",
        display_value(config.email_password.as_deref(), true)
    );
    println!(
        "openai_api_key:  {}",
        display_value(config.openai_api_key.as_deref(), true)
    );
    println!("smtp:            {}:{}", config.smtp_host, config.smtp_port);
    println!(
        "notify_to:       {}",
        config.notify_to.as_deref().unwrap_or("(unset)")
    );

    Ok(())
}

fn display_value(value: Option<&str>, secret: bool) -> String {
    match value {
        None => "(unset)".to_string(),
        Some(_) if secret => "********".to_string(),
        Some(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value_redacts_secrets() {
        assert_eq!(display_value(Some("hunter2"), true), "********");
        assert_eq!(display_value(Some("visible"), false), "visible");
        assert_eq!(display_value(None, true), "(unset)");
    }
}
