//! Schedules command - list schedules for a package.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use super::{Context, empty, heading};

/// Arguments for the schedules command.
#[derive(Args, Debug)]
pub struct SchedulesArgs {
    #[command(subcommand)]
    pub command: SchedulesCommand,
}

#[derive(Subcommand, Debug)]
pub enum SchedulesCommand {
    /// List schedules for a package
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

/// Run the schedules command.
pub fn run(args: SchedulesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        SchedulesCommand::List {
            project,
            package,
            version_id,
        } => {
            let schedules = client.list_schedules(&project, &package, version_id.as_deref())?;
            if ctx.json_output {
                return ctx.print_json(&schedules);
            }

            let dim = Style::new().dim();
            heading(&format!("Schedules in {}/{}", project, package));
            if schedules.is_empty() {
                empty("schedules");
            }
            for schedule in &schedules {
                println!(
                    "  {} {} {}",
                    schedule.resource,
                    dim.apply_to(format!("[{}]", schedule.schedule)),
                    schedule.action
                );
                println!(
                    "    {} {}  {} {}",
                    dim.apply_to("connection:"),
                    schedule.connection,
                    dim.apply_to("last run:"),
                    schedule.last_run_status
                );
            }
        }
    }

    Ok(())
}
