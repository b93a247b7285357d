//! Malloy Publisher command-line client.
//!
//! Main entry point for the `malloy` CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

use commands::{config, connections, databases, models, packages, projects, query, schedules};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Malloy Publisher - browse projects, packages and models, and run queries
#[derive(Parser)]
#[command(name = "malloy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Publisher URL (overrides the selected context)
    #[arg(long, global = true, env = "MALLOY_SERVER_URL")]
    pub server: Option<String>,

    /// API key sent as a bearer token (overrides the selected context)
    #[arg(long, global = true, env = "MALLOY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Client config context to use instead of current-context
    #[arg(long, global = true)]
    pub context: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Projects hosted on the server
    Projects(projects::ProjectsArgs),

    /// Packages within a project
    Packages(packages::PackagesArgs),

    /// Models within a package
    Models(models::ModelsArgs),

    /// Execute a query against a model
    Query(query::QueryArgs),

    /// Databases embedded in a package
    Databases(databases::DatabasesArgs),

    /// Schedules running for a package
    Schedules(schedules::SchedulesArgs),

    /// Database connections configured for a project
    Connections(connections::ConnectionsArgs),

    /// Client configuration and contexts
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose);

    let ctx = commands::Context {
        server: cli.server,
        api_key: cli.api_key,
        context: cli.context,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Projects(args) => projects::run(args, &ctx),
        Commands::Packages(args) => packages::run(args, &ctx),
        Commands::Models(args) => models::run(args, &ctx),
        Commands::Query(args) => query::run(args, &ctx),
        Commands::Databases(args) => databases::run(args, &ctx),
        Commands::Schedules(args) => schedules::run(args, &ctx),
        Commands::Connections(args) => connections::run(args, &ctx),
        Commands::Config(args) => config::run(args, &ctx),
    }
}

/// Human-readable events go to stderr; every event from our crates is
/// also appended as JSON to `<config dir>/logs/malloy.<date>.log`.
///
/// The file layer is skipped when the log directory is unusable. The
/// returned guard flushes the file writer on drop.
fn init_logging(verbose: bool) -> Option<WorkerGuard> {
    let console_filter = if verbose {
        "malloy=debug,malloy_client=debug,malloy_config=debug,warn"
    } else {
        "malloy=info,malloy_client=info,warn"
    };

    let appender = malloy_config::config_dir().and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("malloy")
            .filename_suffix("log")
            .build(dir.join("logs"))
            .ok()
    });
    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new("malloy=trace,malloy_client=trace,malloy_config=trace"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(console_filter)),
        )
        .with(file_layer)
        .init();

    guard
}
