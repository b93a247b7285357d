//! Query command - execute a query against a model.

use anyhow::Result;
use clap::Args;
use malloy_client::QueryParams;

use super::Context;

/// Arguments for the query command.
///
/// Run either an ad-hoc `--query`, or a named query with `--source` and
/// `--query-name`.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Project name
    pub project: String,

    /// Package name
    pub package: String,

    /// Model path within the package (e.g. flights.malloy)
    pub path: String,

    /// Ad-hoc Malloy query text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Source the named query is defined on
    #[arg(short, long)]
    pub source: Option<String>,

    /// Named query to run
    #[arg(long)]
    pub query_name: Option<String>,

    /// Package version
    #[arg(long)]
    pub version_id: Option<String>,
}

impl QueryArgs {
    fn params(&self) -> QueryParams {
        QueryParams {
            project_name: self.project.clone(),
            package_name: self.package.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            source_name: self.source.clone(),
            query_name: self.query_name.clone(),
            version_id: self.version_id.clone(),
        }
    }
}

/// Run the query command.
pub fn run(args: QueryArgs, ctx: &Context) -> Result<()> {
    let params = args.params();
    params.validate()?;

    let client = ctx.client()?;
    let result = client.execute_query(&params)?;

    if ctx.json_output {
        return ctx.print_json(&result);
    }

    // The result is itself a JSON document; pretty-print it when it parses.
    match serde_json::from_str::<serde_json::Value>(&result.query_result) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{}", result.query_result),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> QueryArgs {
        QueryArgs {
            project: "home".to_string(),
            package: "faa".to_string(),
            path: "flights.malloy".to_string(),
            query: None,
            source: None,
            query_name: None,
            version_id: None,
        }
    }

    #[test]
    fn test_params_carry_every_flag() {
        let args = QueryArgs {
            source: Some("flights".to_string()),
            query_name: Some("by_carrier".to_string()),
            version_id: Some("v2".to_string()),
            ..args()
        };
        let params = args.params();
        assert_eq!(params.project_name, "home");
        assert_eq!(params.path, "flights.malloy");
        assert_eq!(params.source_name.as_deref(), Some("flights"));
        assert_eq!(params.query_name.as_deref(), Some("by_carrier"));
        assert_eq!(params.version_id.as_deref(), Some("v2"));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_conflicting_flags_rejected_locally() {
        let args = QueryArgs {
            query: Some("run: flights -> { aggregate: c is count() }".to_string()),
            query_name: Some("by_carrier".to_string()),
            source: Some("flights".to_string()),
            ..args()
        };
        let err = args.params().validate().unwrap_err();
        assert!(err.to_string().contains("both query and query_name"));
    }
}
