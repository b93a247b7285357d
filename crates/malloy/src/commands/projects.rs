//! Projects command - list projects and show project readmes.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use super::{Context, empty, heading};

/// Arguments for the projects command.
#[derive(Args, Debug)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    /// List projects hosted on the server
    List,

    /// Show a project's readme
    About {
        /// Project name
        project: String,
    },
}

/// Run the projects command.
pub fn run(args: ProjectsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        ProjectsCommand::List => {
            let projects = client.list_projects()?;
            if ctx.json_output {
                return ctx.print_json(&projects);
            }

            heading("Projects");
            if projects.is_empty() {
                empty("projects");
            }
            for project in &projects {
                println!("  {}", project.name);
            }
        }
        ProjectsCommand::About { project } => {
            let about = client.get_about(&project)?;
            if ctx.json_output {
                return ctx.print_json(&about);
            }

            heading(&project);
            if about.readme.trim().is_empty() {
                let dim = Style::new().dim();
                println!("{}", dim.apply_to("(no readme)"));
            } else {
                println!("{}", about.readme);
            }
        }
    }

    Ok(())
}
