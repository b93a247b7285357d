//! Schedules API.

use super::version_param;
use crate::client::MalloyClient;
use crate::error::Result;
use crate::types::Schedule;

impl MalloyClient {
    /// List the schedules running for a package.
    pub fn list_schedules(
        &self,
        project_name: &str,
        package_name: &str,
        version_id: Option<&str>,
    ) -> Result<Vec<Schedule>> {
        let url = self.url(&["projects", project_name, "packages", package_name, "schedules"])?;
        self.get(url, &version_param(version_id))
    }
}
