//! Connections command - inspect a project's database connections.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;
use malloy_client::{Connection, ConnectionConfig};

use super::{Context, empty, heading};

/// Arguments for the connections command.
#[derive(Args, Debug)]
pub struct ConnectionsArgs {
    #[command(subcommand)]
    pub command: ConnectionsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConnectionsCommand {
    /// List connections configured for a project
    List {
        /// Project name
        project: String,
    },

    /// Show a single connection
    Show {
        /// Project name
        project: String,

        /// Connection name
        name: String,
    },
}

/// Run the connections command.
pub fn run(args: ConnectionsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        ConnectionsCommand::List { project } => {
            let connections = client.list_connections(&project)?;
            if ctx.json_output {
                return ctx.print_json(&connections);
            }

            let dim = Style::new().dim();
            heading(&format!("Connections in {}", project));
            if connections.is_empty() {
                empty("connections");
            }
            for connection in &connections {
                println!(
                    "  {:<24} {}",
                    connection.name,
                    dim.apply_to(connection.database_type())
                );
            }
        }
        ConnectionsCommand::Show { project, name } => {
            let connection = client.get_connection(&project, &name)?;
            if ctx.json_output {
                return ctx.print_json(&connection);
            }
            print_connection(&connection);
        }
    }

    Ok(())
}

/// Print connection details. Secrets are never echoed.
fn print_connection(connection: &Connection) {
    let dim = Style::new().dim();
    let field = |label: &str, value: &dyn std::fmt::Display| {
        println!("  {:<12} {}", dim.apply_to(label), value);
    };

    heading(&connection.name);
    field("type", &connection.database_type());

    match &connection.config {
        ConnectionConfig::Postgres(pg) => {
            field("host", &pg.host);
            field("port", &pg.port);
            field("database", &pg.database_name);
            field("user", &pg.user_name);
        }
        ConnectionConfig::Bigquery(bq) => {
            field("project", &bq.default_project_id);
            field("billing", &bq.billing_project_id);
            field("location", &bq.location);
        }
        ConnectionConfig::Snowflake(sf) => {
            field("account", &sf.account);
            field("user", &sf.username);
            field("warehouse", &sf.warehouse);
            field("database", &sf.database);
            field("schema", &sf.schema_name);
        }
        ConnectionConfig::Trino(trino) => {
            field("server", &trino.server);
            field("port", &trino.port);
            field("catalog", &trino.catalog);
            field("schema", &trino.schema_name);
            field("user", &trino.user);
        }
    }
}
