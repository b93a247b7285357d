//! Packages command - list and inspect packages.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use super::{Context, empty, heading};

/// Arguments for the packages command.
#[derive(Args, Debug)]
pub struct PackagesArgs {
    #[command(subcommand)]
    pub command: PackagesCommand,
}

#[derive(Subcommand, Debug)]
pub enum PackagesCommand {
    /// List packages in a project
    List {
        /// Project name
        project: String,
    },

    /// Show a single package
    Show {
        /// Project name
        project: String,

        /// Package name
        package: String,

        /// Package version
        #[arg(long)]
        version_id: Option<String>,
    },
}

/// Run the packages command.
pub fn run(args: PackagesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    match args.command {
        PackagesCommand::List { project } => {
            let packages = client.list_packages(&project)?;
            if ctx.json_output {
                return ctx.print_json(&packages);
            }

            heading(&format!("Packages in {}", project));
            if packages.is_empty() {
                empty("packages");
            }
            for package in &packages {
                println!("  {:<24} {}", package.name, dim.apply_to(&package.description));
            }
        }
        PackagesCommand::Show {
            project,
            package,
            version_id,
        } => {
            let package = client.get_package(&project, &package, version_id.as_deref())?;
            if ctx.json_output {
                return ctx.print_json(&package);
            }

            heading(&package.name);
            println!("  {} {}", dim.apply_to("Description:"), package.description);
            if let Some(version) = version_id {
                println!("  {} {}", dim.apply_to("Version:"), version);
            }
        }
    }

    Ok(())
}
