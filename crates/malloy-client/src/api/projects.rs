//! Projects API.

use crate::client::MalloyClient;
use crate::error::Result;
use crate::types::{About, Project};

impl MalloyClient {
    /// List the projects hosted on this server.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.get(self.url(&["projects"])?, &[])
    }

    /// Get metadata (the readme) for a project.
    pub fn get_about(&self, project_name: &str) -> Result<About> {
        self.get(self.url(&["projects", project_name, "about"])?, &[])
    }
}
