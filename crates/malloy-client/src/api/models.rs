//! Models API.

use serde_json::Value;

use super::version_param;
use crate::client::{MalloyClient, decode_value};
use crate::error::Result;
use crate::types::{CompiledModel, Model};

impl MalloyClient {
    /// List the models in a package.
    ///
    /// The server does not repeat the package name per model; each record
    /// is stamped with `package_name` before it is validated.
    pub fn list_models(
        &self,
        project_name: &str,
        package_name: &str,
        version_id: Option<&str>,
    ) -> Result<Vec<Model>> {
        let url = self.url(&["projects", project_name, "packages", package_name, "models"])?;
        let mut data = self.get_value(url, &version_param(version_id))?;
        if let Value::Array(models) = &mut data {
            for model in models {
                stamp_package(model, package_name);
            }
        }
        decode_value(data)
    }

    /// Get a single model by its path within the package.
    pub fn get_model(
        &self,
        project_name: &str,
        package_name: &str,
        model_name: &str,
    ) -> Result<Model> {
        decode_value(self.fetch_model(project_name, package_name, model_name)?)
    }

    /// Get a model together with its sources, queries and notebook cells.
    pub fn get_compiled_model(
        &self,
        project_name: &str,
        package_name: &str,
        model_name: &str,
    ) -> Result<CompiledModel> {
        decode_value(self.fetch_model(project_name, package_name, model_name)?)
    }

    /// Fetch a model payload and normalize it to the record's field names.
    fn fetch_model(&self, project_name: &str, package_name: &str, model_name: &str) -> Result<Value> {
        let url = self.url(&[
            "projects",
            project_name,
            "packages",
            package_name,
            "models",
            model_name,
        ])?;
        let mut data = self.get_value(url, &[])?;
        if let Value::Object(fields) = &mut data
            && let Some(path) = fields.remove("modelPath")
        {
            fields.insert("path".to_string(), path);
        }
        stamp_package(&mut data, package_name);
        Ok(data)
    }
}

/// Insert the owning package name into a model object.
fn stamp_package(model: &mut Value, package_name: &str) {
    if let Value::Object(fields) = model {
        fields.insert(
            "packageName".to_string(),
            Value::String(package_name.to_string()),
        );
    }
}
