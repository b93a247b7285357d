//! Databases API.

use super::version_param;
use crate::client::MalloyClient;
use crate::error::Result;
use crate::types::Database;

impl MalloyClient {
    /// List the databases embedded in a package.
    pub fn list_databases(
        &self,
        project_name: &str,
        package_name: &str,
        version_id: Option<&str>,
    ) -> Result<Vec<Database>> {
        let url = self.url(&["projects", project_name, "packages", package_name, "databases"])?;
        self.get(url, &version_param(version_id))
    }
}
