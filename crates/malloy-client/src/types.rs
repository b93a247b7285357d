//! Record types for the Malloy Publisher API.
//!
//! These types mirror the server's JSON contract. Wire keys are lower camel
//! case; every field whose Rust name differs from its wire name carries an
//! explicit `rename`, so the mapping reads as a table and stays symmetric
//! between decoding and encoding.
//!
//! `data_styles`, `model_def` and `query_result` hold pre-serialized JSON
//! documents. They are passed through as strings and never parsed here.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Enumerations
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of model file within a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "source")]
    Source,
    #[serde(rename = "notebook")]
    Notebook,
}

/// Kind of notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "code")]
    Code,
}

/// Database backend a connection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseType {
    #[serde(rename = "postgres")]
    Postgres,
    #[serde(rename = "bigquery")]
    Bigquery,
    #[serde(rename = "snowflake")]
    Snowflake,
    #[serde(rename = "trino")]
    Trino,
}

impl DatabaseType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Postgres => "postgres",
            DatabaseType::Bigquery => "bigquery",
            DatabaseType::Snowflake => "snowflake",
            DatabaseType::Trino => "trino",
        }
    }

    /// Wire key of the payload object carried for this type.
    pub fn payload_key(&self) -> &'static str {
        match self {
            DatabaseType::Postgres => "postgresConnection",
            DatabaseType::Bigquery => "bigqueryConnection",
            DatabaseType::Snowflake => "snowflakeConnection",
            DatabaseType::Trino => "trinoConnection",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Projects & Packages
// ─────────────────────────────────────────────────────────────────────────────

/// A project hosted on the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
}

/// Project metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub readme: String,
}

/// A named, versioned bundle of models and databases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub description: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Models
// ─────────────────────────────────────────────────────────────────────────────

/// A model file within a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Owning package. The server omits it; the client stamps it in.
    #[serde(rename = "packageName")]
    pub package_name: String,
    /// Path of the model relative to the package root.
    pub path: String,
    #[serde(rename = "type")]
    pub model_type: ModelType,
}

/// A view exposed by a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<String>,
}

/// A named data source defined in a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub views: Vec<View>,
}

/// A named query defined in a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<String>,
}

/// A single notebook cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookCell {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    pub text: String,
    #[serde(rename = "queryName", default, skip_serializing_if = "Option::is_none")]
    pub query_name: Option<String>,
    #[serde(rename = "queryResult", default, skip_serializing_if = "Option::is_none")]
    pub query_result: Option<String>,
}

/// A model together with its compiled contents.
///
/// Carries the [`Model`] fields inline, under the same wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledModel {
    #[serde(rename = "packageName")]
    pub package_name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub model_type: ModelType,
    #[serde(rename = "malloyVersion")]
    pub malloy_version: String,
    /// Opaque JSON document.
    #[serde(rename = "dataStyles")]
    pub data_styles: String,
    /// Opaque JSON document.
    #[serde(rename = "modelDef")]
    pub model_def: String,
    pub sources: Vec<Source>,
    pub queries: Vec<Query>,
    #[serde(rename = "notebookCells")]
    pub notebook_cells: Vec<NotebookCell>,
}

impl CompiledModel {
    /// The plain model record this was compiled from.
    pub fn model(&self) -> Model {
        Model {
            package_name: self.package_name.clone(),
            path: self.path.clone(),
            model_type: self.model_type,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query results
// ─────────────────────────────────────────────────────────────────────────────

/// Result of executing a query: the rows, the model and the render styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Data styles for rendering the result (opaque JSON).
    #[serde(rename = "dataStyles")]
    pub data_styles: String,
    /// Malloy model definition (opaque JSON).
    #[serde(rename = "modelDef")]
    pub model_def: String,
    /// Malloy query result (opaque JSON).
    #[serde(rename = "queryResult")]
    pub query_result: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Databases & Schedules
// ─────────────────────────────────────────────────────────────────────────────

/// A database file embedded in a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub path: String,
    /// Size in bytes.
    pub size: u64,
}

/// A recurring action bound to a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub resource: String,
    /// Cron-like expression.
    pub schedule: String,
    pub action: String,
    pub connection: String,
    /// Epoch seconds of the last run.
    #[serde(rename = "lastRunTime")]
    pub last_run_time: f64,
    #[serde(rename = "lastRunStatus")]
    pub last_run_status: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Connections
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresConnection {
    pub host: String,
    pub port: u16,
    #[serde(rename = "databaseName")]
    pub database_name: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
    #[serde(rename = "connectionString")]
    pub connection_string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigqueryConnection {
    #[serde(rename = "defaultProjectId")]
    pub default_project_id: String,
    #[serde(rename = "billingProjectId")]
    pub billing_project_id: String,
    pub location: String,
    #[serde(rename = "serviceAccountKeyJson")]
    pub service_account_key_json: String,
    #[serde(rename = "maximumBytesBilled")]
    pub maximum_bytes_billed: String,
    #[serde(rename = "queryTimeoutMilliseconds")]
    pub query_timeout_milliseconds: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnowflakeConnection {
    pub account: String,
    pub username: String,
    pub password: String,
    pub warehouse: String,
    pub database: String,
    #[serde(rename = "schema")]
    pub schema_name: String,
    #[serde(rename = "responseTimeoutMilliseconds")]
    pub response_timeout_milliseconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrinoConnection {
    pub server: String,
    pub port: f64,
    pub catalog: String,
    #[serde(rename = "schema")]
    pub schema_name: String,
    pub user: String,
    pub password: String,
}

/// Backend-specific settings of a connection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionConfig {
    Postgres(PostgresConnection),
    Bigquery(BigqueryConnection),
    Snowflake(SnowflakeConnection),
    Trino(TrinoConnection),
}

impl ConnectionConfig {
    /// The discriminant written to the wire `type` field.
    pub fn database_type(&self) -> DatabaseType {
        match self {
            ConnectionConfig::Postgres(_) => DatabaseType::Postgres,
            ConnectionConfig::Bigquery(_) => DatabaseType::Bigquery,
            ConnectionConfig::Snowflake(_) => DatabaseType::Snowflake,
            ConnectionConfig::Trino(_) => DatabaseType::Trino,
        }
    }
}

/// Configuration for reaching an external database.
///
/// On the wire this is one object with a `type` discriminant and one
/// optional payload per backend. Decoding requires the payload matching
/// `type` and rejects payloads for any other backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConnectionWire", into = "ConnectionWire")]
pub struct Connection {
    pub name: String,
    pub config: ConnectionConfig,
}

impl Connection {
    pub fn database_type(&self) -> DatabaseType {
        self.config.database_type()
    }
}

#[derive(Serialize, Deserialize)]
struct ConnectionWire {
    name: String,
    #[serde(rename = "type")]
    connection_type: DatabaseType,
    #[serde(rename = "postgresConnection", default, skip_serializing_if = "Option::is_none")]
    postgres_connection: Option<PostgresConnection>,
    #[serde(rename = "bigqueryConnection", default, skip_serializing_if = "Option::is_none")]
    bigquery_connection: Option<BigqueryConnection>,
    #[serde(rename = "snowflakeConnection", default, skip_serializing_if = "Option::is_none")]
    snowflake_connection: Option<SnowflakeConnection>,
    #[serde(rename = "trinoConnection", default, skip_serializing_if = "Option::is_none")]
    trino_connection: Option<TrinoConnection>,
}

impl TryFrom<ConnectionWire> for Connection {
    type Error = String;

    fn try_from(wire: ConnectionWire) -> Result<Self, Self::Error> {
        let present = [
            (DatabaseType::Postgres, wire.postgres_connection.is_some()),
            (DatabaseType::Bigquery, wire.bigquery_connection.is_some()),
            (DatabaseType::Snowflake, wire.snowflake_connection.is_some()),
            (DatabaseType::Trino, wire.trino_connection.is_some()),
        ];
        let stray: Vec<&str> = present
            .iter()
            .filter(|(ty, set)| *set && *ty != wire.connection_type)
            .map(|(ty, _)| ty.payload_key())
            .collect();
        if !stray.is_empty() {
            return Err(format!(
                "connection '{}' of type '{}' carries payload for another type: {}",
                wire.name,
                wire.connection_type,
                stray.join(", ")
            ));
        }

        let missing = || {
            format!(
                "connection '{}' of type '{}' is missing '{}'",
                wire.name,
                wire.connection_type,
                wire.connection_type.payload_key()
            )
        };
        let config = match wire.connection_type {
            DatabaseType::Postgres => {
                ConnectionConfig::Postgres(wire.postgres_connection.ok_or_else(missing)?)
            }
            DatabaseType::Bigquery => {
                ConnectionConfig::Bigquery(wire.bigquery_connection.ok_or_else(missing)?)
            }
            DatabaseType::Snowflake => {
                ConnectionConfig::Snowflake(wire.snowflake_connection.ok_or_else(missing)?)
            }
            DatabaseType::Trino => {
                ConnectionConfig::Trino(wire.trino_connection.ok_or_else(missing)?)
            }
        };

        Ok(Connection {
            name: wire.name,
            config,
        })
    }
}

impl From<Connection> for ConnectionWire {
    fn from(connection: Connection) -> Self {
        let mut wire = ConnectionWire {
            name: connection.name,
            connection_type: connection.config.database_type(),
            postgres_connection: None,
            bigquery_connection: None,
            snowflake_connection: None,
            trino_connection: None,
        };
        match connection.config {
            ConnectionConfig::Postgres(c) => wire.postgres_connection = Some(c),
            ConnectionConfig::Bigquery(c) => wire.bigquery_connection = Some(c),
            ConnectionConfig::Snowflake(c) => wire.snowflake_connection = Some(c),
            ConnectionConfig::Trino(c) => wire.trino_connection = Some(c),
        }
        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_uses_wire_names() {
        let model: Model = serde_json::from_value(json!({
            "packageName": "faa",
            "path": "flights.malloy",
            "type": "source"
        }))
        .unwrap();
        assert_eq!(model.package_name, "faa");
        assert_eq!(model.model_type, ModelType::Source);

        let back = serde_json::to_value(&model).unwrap();
        assert_eq!(back["packageName"], "faa");
        assert_eq!(back["type"], "source");
        assert!(back.get("package_name").is_none());
    }

    #[test]
    fn test_enum_rejects_unknown_literal() {
        let result: Result<Model, _> = serde_json::from_value(json!({
            "packageName": "faa",
            "path": "flights.malloy",
            "type": "Source"
        }));
        assert!(result.is_err());

        assert!(serde_json::from_value::<CellType>(json!("sql")).is_err());
        assert!(serde_json::from_value::<DatabaseType>(json!("mysql")).is_err());
    }

    #[test]
    fn test_package_requires_description() {
        let result: Result<Package, _> = serde_json::from_value(json!({"name": "faa"}));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("description"));
    }

    #[test]
    fn test_source_defaults_empty_lists() {
        let source: Source = serde_json::from_value(json!({"name": "flights"})).unwrap();
        assert!(source.annotations.is_empty());
        assert!(source.views.is_empty());
    }

    #[test]
    fn test_notebook_cell_optional_fields() {
        let cell: NotebookCell =
            serde_json::from_value(json!({"type": "markdown", "text": "# Flights"})).unwrap();
        assert_eq!(cell.cell_type, CellType::Markdown);
        assert!(cell.query_name.is_none());

        let cell: NotebookCell = serde_json::from_value(json!({
            "type": "code",
            "text": "run: flights -> by_carrier",
            "queryName": "by_carrier",
            "queryResult": "{}"
        }))
        .unwrap();
        assert_eq!(cell.query_name.as_deref(), Some("by_carrier"));
        assert_eq!(cell.query_result.as_deref(), Some("{}"));
    }

    #[test]
    fn test_compiled_model_carries_model_fields() {
        let compiled: CompiledModel = serde_json::from_value(json!({
            "packageName": "faa",
            "path": "flights.malloy",
            "type": "source",
            "malloyVersion": "0.0.240",
            "dataStyles": "{}",
            "modelDef": "{\"contents\":{}}",
            "sources": [{"name": "flights", "views": [{"name": "by_carrier"}]}],
            "queries": [{"name": "top_carriers", "annotations": ["# bar_chart"]}],
            "notebookCells": []
        }))
        .unwrap();
        assert_eq!(compiled.path, "flights.malloy");
        assert_eq!(
            compiled.model(),
            Model {
                package_name: "faa".to_string(),
                path: "flights.malloy".to_string(),
                model_type: ModelType::Source,
            }
        );
        assert_eq!(compiled.model_def, "{\"contents\":{}}");
        assert_eq!(compiled.sources[0].views[0].name, "by_carrier");
        assert_eq!(compiled.queries[0].annotations, vec!["# bar_chart"]);
    }

    #[test]
    fn test_query_result_is_opaque() {
        let result: QueryResult = serde_json::from_value(json!({
            "dataStyles": "{\"a\":1}",
            "modelDef": "{}",
            "queryResult": "{\"data\":[]}"
        }))
        .unwrap();
        assert_eq!(result.data_styles, "{\"a\":1}");
        assert_eq!(result.query_result, "{\"data\":[]}");

        // Structured JSON where an opaque string is expected is a shape error.
        let result: Result<QueryResult, _> = serde_json::from_value(json!({
            "dataStyles": {"a": 1},
            "modelDef": "{}",
            "queryResult": "{}"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_schedule_wire_names() {
        let schedule: Schedule = serde_json::from_value(json!({
            "resource": "flights.malloy",
            "schedule": "0 * * * *",
            "action": "refresh",
            "connection": "bigquery",
            "lastRunTime": 1700000000.5,
            "lastRunStatus": "ok"
        }))
        .unwrap();
        assert_eq!(schedule.last_run_time, 1700000000.5);
        assert_eq!(schedule.last_run_status, "ok");
    }

    fn snowflake_json() -> serde_json::Value {
        json!({
            "account": "acme",
            "username": "analyst",
            "password": "secret",
            "warehouse": "COMPUTE_WH",
            "database": "ANALYTICS",
            "schema": "PUBLIC",
            "responseTimeoutMilliseconds": 30000
        })
    }

    #[test]
    fn test_connection_decodes_matching_payload() {
        let connection: Connection = serde_json::from_value(json!({
            "name": "warehouse",
            "type": "snowflake",
            "snowflakeConnection": snowflake_json()
        }))
        .unwrap();
        assert_eq!(connection.database_type(), DatabaseType::Snowflake);
        match &connection.config {
            ConnectionConfig::Snowflake(sf) => {
                assert_eq!(sf.schema_name, "PUBLIC");
                assert_eq!(sf.response_timeout_milliseconds, 30000);
            }
            other => panic!("expected snowflake config, got {:?}", other),
        }
    }

    #[test]
    fn test_connection_serializes_only_matching_payload() {
        let connection: Connection = serde_json::from_value(json!({
            "name": "warehouse",
            "type": "snowflake",
            "snowflakeConnection": snowflake_json()
        }))
        .unwrap();
        let wire = serde_json::to_value(&connection).unwrap();
        assert_eq!(wire["type"], "snowflake");
        assert_eq!(wire["snowflakeConnection"]["schema"], "PUBLIC");
        assert!(wire.get("postgresConnection").is_none());
        assert!(wire.get("config").is_none());
    }

    #[test]
    fn test_connection_rejects_missing_payload() {
        let result: Result<Connection, _> = serde_json::from_value(json!({
            "name": "warehouse",
            "type": "snowflake"
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("snowflakeConnection"), "{err}");
    }

    #[test]
    fn test_connection_rejects_mismatched_payload() {
        let result: Result<Connection, _> = serde_json::from_value(json!({
            "name": "warehouse",
            "type": "postgres",
            "postgresConnection": {
                "host": "localhost",
                "port": 5432,
                "databaseName": "analytics",
                "userName": "analyst",
                "password": "secret",
                "connectionString": "postgres://localhost/analytics"
            },
            "snowflakeConnection": snowflake_json()
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("another type"), "{err}");
    }
}
