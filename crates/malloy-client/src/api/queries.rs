//! Query execution API.

use crate::client::MalloyClient;
use crate::error::{Error, Result};
use crate::types::QueryResult;

/// Parameters for executing a query against a model.
///
/// Either run an ad-hoc `query`, or a named query (`query_name`) on a
/// source (`source_name`). The two forms are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Project containing the package.
    pub project_name: String,
    /// Package containing the model.
    pub package_name: String,
    /// Path of the model within the package.
    pub path: String,
    /// Ad-hoc Malloy query text.
    pub query: Option<String>,
    /// Source within the model.
    pub source_name: Option<String>,
    /// Named query defined on the source.
    pub query_name: Option<String>,
    /// Package version.
    pub version_id: Option<String>,
}

impl QueryParams {
    /// Target the model at `path` in `project_name`/`package_name`.
    pub fn new(
        project_name: impl Into<String>,
        package_name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            package_name: package_name.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the ad-hoc query text.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the source name.
    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Set the named query.
    pub fn with_query_name(mut self, query_name: impl Into<String>) -> Self {
        self.query_name = Some(query_name.into());
        self
    }

    /// Set the package version.
    pub fn with_version(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    /// Check the parameter combination without sending anything.
    pub fn validate(&self) -> Result<()> {
        let query = non_empty(&self.query);
        let query_name = non_empty(&self.query_name);

        if query.is_some() && query_name.is_some() {
            return Err(Error::invalid_input(
                "cannot specify both query and query_name",
            ));
        }
        if query_name.is_some() && non_empty(&self.source_name).is_none() {
            return Err(Error::invalid_input(
                "source_name is required when query_name is specified",
            ));
        }
        Ok(())
    }

    /// Query-string pairs for the request, limited to non-empty values.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("versionId", &self.version_id),
            ("query", &self.query),
            ("sourceName", &self.source_name),
            ("queryName", &self.query_name),
        ]
        .into_iter()
        .filter_map(|(key, value)| non_empty(value).map(|v| (key, v)))
        .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl MalloyClient {
    /// Execute a query and return its results.
    ///
    /// Fails with [`Error::InvalidInput`] before any request is sent if
    /// both `query` and `query_name` are set, or if `query_name` is set
    /// without `source_name`.
    pub fn execute_query(&self, params: &QueryParams) -> Result<QueryResult> {
        params.validate()?;

        let url = self.url(&[
            "projects",
            &params.project_name,
            "packages",
            &params.package_name,
            "queryResults",
            &params.path,
        ])?;
        self.get(url, &params.to_query_pairs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> QueryParams {
        QueryParams::new("home", "faa", "flights.malloy")
    }

    #[test]
    fn test_rejects_query_and_query_name() {
        let err = params()
            .with_query("run: flights -> by_carrier")
            .with_source("flights")
            .with_query_name("top_carriers")
            .validate()
            .unwrap_err();
        assert!(err.is_caller_error());
        assert!(err.to_string().contains("both query and query_name"));
    }

    #[test]
    fn test_rejects_query_name_without_source() {
        let err = params()
            .with_query_name("top_carriers")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("source_name is required"));

        let err = params()
            .with_query_name("top_carriers")
            .with_source("")
            .validate()
            .unwrap_err();
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_accepts_valid_combinations() {
        assert!(params().validate().is_ok());
        assert!(params().with_query("run: flights -> by_carrier").validate().is_ok());
        assert!(
            params()
                .with_source("flights")
                .with_query_name("top_carriers")
                .validate()
                .is_ok()
        );
        // Empty strings count as unset.
        assert!(params().with_query("").with_query_name("").validate().is_ok());
    }

    #[test]
    fn test_query_pairs_only_non_empty() {
        let named = params()
            .with_source("flights")
            .with_query_name("top_carriers")
            .with_version("");
        let pairs = named.to_query_pairs();
        assert_eq!(
            pairs,
            vec![("sourceName", "flights"), ("queryName", "top_carriers")]
        );

        assert!(params().to_query_pairs().is_empty());
    }

    #[test]
    fn test_execute_query_validates_before_network() {
        // Unroutable base URL: reaching the network would surface a transport error.
        let client = MalloyClient::new("http://127.0.0.1:1", None).unwrap();
        let err = client
            .execute_query(&params().with_query("q").with_query_name("n"))
            .unwrap_err();
        assert!(err.is_caller_error());
    }
}
