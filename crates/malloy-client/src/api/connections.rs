//! Connections API.

use crate::client::MalloyClient;
use crate::error::Result;
use crate::types::Connection;

impl MalloyClient {
    /// List the database connections configured for a project.
    pub fn list_connections(&self, project_name: &str) -> Result<Vec<Connection>> {
        self.get(self.url(&["projects", project_name, "connections"])?, &[])
    }

    /// Get a single connection by name.
    pub fn get_connection(&self, project_name: &str, connection_name: &str) -> Result<Connection> {
        let url = self.url(&["projects", project_name, "connections", connection_name])?;
        self.get(url, &[])
    }
}
