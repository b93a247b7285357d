//! Models command - list models and inspect compiled models.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::{Style, style};
use malloy_client::{CellType, CompiledModel, ModelType};

use super::{Context, empty, heading};

/// Arguments for the models command.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ModelsCommand {
    /// List models in a package
    List {
        /// Project name
        project: String,

        /// Package name
        package: String,

        /// Package version
        #[arg(long)]
        version_id: Option<String>,
    },

    /// Show a model
    Show {
        /// Project name
        project: String,

        /// Package name
        package: String,

        /// Model path within the package (e.g. flights.malloy)
        model: String,

        /// Include sources, queries and notebook cells
        #[arg(long)]
        compiled: bool,
    },
}

/// Run the models command.
pub fn run(args: ModelsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    match args.command {
        ModelsCommand::List {
            project,
            package,
            version_id,
        } => {
            let models = client.list_models(&project, &package, version_id.as_deref())?;
            if ctx.json_output {
                return ctx.print_json(&models);
            }

            heading(&format!("Models in {}/{}", project, package));
            if models.is_empty() {
                empty("models");
            }
            for model in &models {
                println!(
                    "  {:<40} {}",
                    model.path,
                    dim.apply_to(model_type_label(model.model_type))
                );
            }
        }
        ModelsCommand::Show {
            project,
            package,
            model,
            compiled,
        } => {
            if compiled {
                let compiled = client.get_compiled_model(&project, &package, &model)?;
                if ctx.json_output {
                    return ctx.print_json(&compiled);
                }
                print_compiled(&compiled, ctx.verbose);
            } else {
                let model = client.get_model(&project, &package, &model)?;
                if ctx.json_output {
                    return ctx.print_json(&model);
                }
                heading(&model.path);
                println!("  {} {}", dim.apply_to("Package:"), model.package_name);
                println!(
                    "  {} {}",
                    dim.apply_to("Type:"),
                    model_type_label(model.model_type)
                );
            }
        }
    }

    Ok(())
}

fn model_type_label(model_type: ModelType) -> &'static str {
    match model_type {
        ModelType::Source => "source",
        ModelType::Notebook => "notebook",
    }
}

fn print_compiled(compiled: &CompiledModel, verbose: bool) {
    let dim = Style::new().dim();

    heading(&compiled.path);
    println!("  {} {}", dim.apply_to("Package:"), compiled.package_name);
    println!(
        "  {} {}",
        dim.apply_to("Type:"),
        model_type_label(compiled.model_type)
    );
    println!("  {} {}", dim.apply_to("Malloy:"), compiled.malloy_version);

    if !compiled.sources.is_empty() {
        println!();
        println!("{}", style("Sources").bold());
        for source in &compiled.sources {
            println!("  {}", source.name);
            for view in &source.views {
                println!("    {} {}", dim.apply_to("view"), view.name);
            }
        }
    }

    if !compiled.queries.is_empty() {
        println!();
        println!("{}", style("Queries").bold());
        for query in &compiled.queries {
            println!("  {}", query.name);
        }
    }

    if !compiled.notebook_cells.is_empty() {
        println!();
        println!("{}", style("Notebook").bold());
        for (i, cell) in compiled.notebook_cells.iter().enumerate() {
            let kind = match cell.cell_type {
                CellType::Markdown => "markdown",
                CellType::Code => "code",
            };
            println!("  {} {}", dim.apply_to(format!("[{}]", i + 1)), kind);
            if verbose {
                for line in cell.text.lines() {
                    println!("    {}", line);
                }
            }
        }
    }
}
