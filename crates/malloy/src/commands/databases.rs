//! Databases command - list databases embedded in a package.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use super::{Context, empty, heading};

/// Arguments for the databases command.
#[derive(Args, Debug)]
pub struct DatabasesArgs {
    #[command(subcommand)]
    pub command: DatabasesCommand,
}

#[derive(Subcommand, Debug)]
pub enum DatabasesCommand {
    /// List databases in a package
    List {
        /// Project name
        project: String,

        /// Package name
        package: String,

        /// Package version
        #[arg(long)]
        version_id: Option<String>,
    },
}

/// Run the databases command.
pub fn run(args: DatabasesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        DatabasesCommand::List {
            project,
            package,
            version_id,
        } => {
            let databases = client.list_databases(&project, &package, version_id.as_deref())?;
            if ctx.json_output {
                return ctx.print_json(&databases);
            }

            let dim = Style::new().dim();
            heading(&format!("Databases in {}/{}", project, package));
            if databases.is_empty() {
                empty("databases");
            }
            for database in &databases {
                println!(
                    "  {:<40} {}",
                    database.path,
                    dim.apply_to(format_size(database.size))
                );
            }
        }
    }

    Ok(())
}

/// Human-readable byte count.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}
