//! CLI command handlers.

use std::time::Duration;

use anyhow::Result;
use console::{Style, style};
use malloy_client::MalloyClient;
use malloy_config::ClientConfig;
use serde::Serialize;

pub mod config;
pub mod connections;
pub mod databases;
pub mod models;
pub mod packages;
pub mod projects;
pub mod query;
pub mod schedules;

/// Server used when neither a flag nor a context names one.
pub const DEFAULT_SERVER: &str = "http://localhost:4000";

/// Shared context for all commands.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Server URL from `--server` / `MALLOY_SERVER_URL`.
    pub server: Option<String>,
    /// API key from `--api-key` / `MALLOY_API_KEY`.
    pub api_key: Option<String>,
    /// Context name from `--context`.
    pub context: Option<String>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

/// Where and how to connect, after flags and config are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub server: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Context {
    /// Merge flags over the selected config context over the defaults.
    pub fn resolve(&self, config: &ClientConfig) -> Result<Target> {
        let selected = config.select(self.context.as_deref())?;

        let server = self
            .server
            .clone()
            .or_else(|| selected.map(|c| c.server.clone()))
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        let api_key = match &self.api_key {
            Some(key) => Some(key.clone()),
            None => match selected {
                Some(context) => context.api_key()?,
                None => None,
            },
        };

        let timeout = selected
            .map(|c| config.effective_timeout(c))
            .unwrap_or(config.defaults.timeout);

        Ok(Target {
            server,
            api_key,
            timeout: Duration::from_secs(timeout),
        })
    }

    /// Build a client from flags and the on-disk client config.
    pub fn client(&self) -> Result<MalloyClient> {
        let config = malloy_config::load_client_config()?;
        let target = self.resolve(&config)?;

        tracing::debug!(
            server = %target.server,
            authenticated = target.api_key.is_some(),
            "connecting"
        );

        let mut builder = MalloyClient::builder()
            .base_url(target.server)
            .timeout(target.timeout);
        if let Some(key) = target.api_key {
            builder = builder.api_key(key);
        }
        Ok(builder.build()?)
    }

    /// Print a value as pretty JSON.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Print a bold section heading with a rule underneath.
pub fn heading(title: &str) {
    let dim = Style::new().dim();
    println!("{}", style(title).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
}

/// Print the empty-list placeholder.
pub fn empty(what: &str) {
    let dim = Style::new().dim();
    println!("{}", dim.apply_to(format!("No {} found", what)));
}
