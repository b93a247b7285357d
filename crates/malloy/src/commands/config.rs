//! Config command - manage client contexts.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use console::{Style, style};
use malloy_config::{AuthConfig, ClientConfig, Context as ClientContext};
use serde::Serialize;

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current context name
    CurrentContext,

    /// List configured contexts
    GetContexts,

    /// Switch the current context
    UseContext {
        /// Context to switch to
        name: String,
    },

    /// Create or update a context
    SetContext {
        /// Context name
        name: String,

        /// Publisher URL (e.g., http://localhost:4000)
        #[arg(long)]
        server: Option<String>,

        /// File holding the API key
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Environment variable holding the API key
        #[arg(long)]
        key_env: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete a context
    DeleteContext {
        /// Context to delete
        name: String,
    },

    /// Show the client config file path
    Path,
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::CurrentContext => cmd_current_context(ctx),
        ConfigCommand::GetContexts => cmd_get_contexts(ctx),
        ConfigCommand::UseContext { name } => cmd_use_context(&name),
        ConfigCommand::SetContext {
            name,
            server,
            key_file,
            key_env,
            timeout,
        } => {
            let update = ContextUpdate {
                server,
                key_file,
                key_env,
                timeout,
            };
            cmd_set_context(&name, update)
        }
        ConfigCommand::DeleteContext { name } => cmd_delete_context(&name),
        ConfigCommand::Path => cmd_path(),
    }
}

fn cmd_current_context(ctx: &Context) -> Result<()> {
    let config = malloy_config::load_client_config()?;

    if ctx.json_output {
        return ctx.print_json(&config.current_context);
    }

    match &config.current_context {
        Some(name) => println!("{}", name),
        None => println!("No current context. Run 'malloy config use-context <name>' to pick one."),
    }
    Ok(())
}

#[derive(Serialize)]
struct ContextRow<'a> {
    name: &'a str,
    server: &'a str,
    current: bool,
    authenticated: bool,
}

fn cmd_get_contexts(ctx: &Context) -> Result<()> {
    let config = malloy_config::load_client_config()?;
    let current = config.current_context.as_deref();

    let rows: Vec<ContextRow<'_>> = config
        .contexts
        .iter()
        .map(|c| ContextRow {
            name: &c.name,
            server: &c.server,
            current: current == Some(c.name.as_str()),
            authenticated: c.has_api_key(),
        })
        .collect();

    if ctx.json_output {
        return ctx.print_json(&rows);
    }

    if rows.is_empty() {
        println!("No contexts configured. Create one with:");
        println!("  malloy config set-context local --server http://localhost:4000");
        return Ok(());
    }

    let dim = Style::new().dim();
    println!("{}", style(format!("  {:<16} {}", "NAME", "SERVER")).bold());
    for row in &rows {
        let marker = if row.current { "*" } else { " " };
        let auth = if row.authenticated { " (api key)" } else { "" };
        println!(
            "{} {:<16} {}{}",
            marker,
            row.name,
            row.server,
            dim.apply_to(auth)
        );
    }
    Ok(())
}

fn cmd_use_context(name: &str) -> Result<()> {
    let mut config = malloy_config::load_client_config()?;
    config.use_context(name)?;
    malloy_config::save_client_config(&config)?;

    println!("Switched to context \"{}\".", name);
    Ok(())
}

/// Fields supplied to `set-context`; unset fields keep their old value.
#[derive(Debug, Default)]
struct ContextUpdate {
    server: Option<String>,
    key_file: Option<PathBuf>,
    key_env: Option<String>,
    timeout: Option<u64>,
}

/// Apply an update to the named context, creating it if needed.
///
/// Returns `true` when the context was created.
fn apply_update(config: &mut ClientConfig, name: &str, update: ContextUpdate) -> Result<bool> {
    let mut context = match config.get_context(name).cloned() {
        Some(context) => context,
        None => {
            let server = update
                .server
                .clone()
                .ok_or_else(|| anyhow!("--server is required when creating a context"))?;
            ClientContext::new(name, server)
        }
    };

    if let Some(server) = update.server {
        context.server = server;
    }
    if update.key_file.is_some() || update.key_env.is_some() {
        context.auth = Some(AuthConfig::ApiKey {
            key_file: update.key_file,
            key_env: update.key_env,
        });
    }
    if let Some(timeout) = update.timeout {
        context.timeout = Some(timeout);
    }

    Ok(config.set_context(context))
}

fn cmd_set_context(name: &str, update: ContextUpdate) -> Result<()> {
    let mut config = malloy_config::load_client_config()?;
    let created = apply_update(&mut config, name, update)?;
    malloy_config::save_client_config(&config)?;

    if created {
        println!("Context \"{}\" created.", name);
    } else {
        println!("Context \"{}\" modified.", name);
    }
    if created && config.current_context.as_deref() == Some(name) && config.contexts.len() == 1 {
        println!("Context \"{}\" is now the current context.", name);
    }
    Ok(())
}

fn cmd_delete_context(name: &str) -> Result<()> {
    let mut config = malloy_config::load_client_config()?;

    if config.remove_context(name).is_none() {
        return Err(anyhow!("context '{}' not found", name));
    }
    malloy_config::save_client_config(&config)?;

    println!("Context \"{}\" deleted.", name);
    if config.current_context.is_none() {
        println!("No current context. Run 'malloy config use-context <name>' to pick one.");
    }
    Ok(())
}

fn cmd_path() -> Result<()> {
    match malloy_config::client_config_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("Could not determine config directory"),
    }
    Ok(())
}
