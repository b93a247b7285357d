//! Packages API.

use super::version_param;
use crate::client::MalloyClient;
use crate::error::Result;
use crate::types::Package;

impl MalloyClient {
    /// List the packages in a project.
    pub fn list_packages(&self, project_name: &str) -> Result<Vec<Package>> {
        self.get(self.url(&["projects", project_name, "packages"])?, &[])
    }

    /// Get a package, optionally at a specific version.
    pub fn get_package(
        &self,
        project_name: &str,
        package_name: &str,
        version_id: Option<&str>,
    ) -> Result<Package> {
        let url = self.url(&["projects", project_name, "packages", package_name])?;
        self.get(url, &version_param(version_id))
    }
}
