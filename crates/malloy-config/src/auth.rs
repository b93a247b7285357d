//! Credential references and their resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// How a context authenticates.
///
/// Serialized with a `type` tag: `none` or `api-key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AuthConfig {
    None,

    /// Bearer API key read from a file, an environment variable, or both.
    #[serde(rename_all = "kebab-case")]
    ApiKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_file: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_env: Option<String>,
    },
}

impl AuthConfig {
    pub fn api_key_file(path: impl Into<PathBuf>) -> Self {
        Self::ApiKey {
            key_file: Some(path.into()),
            key_env: None,
        }
    }

    pub fn api_key_env(var: impl Into<String>) -> Self {
        Self::ApiKey {
            key_file: None,
            key_env: Some(var.into()),
        }
    }

    /// Read the API key this config points at.
    ///
    /// The key file wins over the environment variable. Absent or blank
    /// sources resolve to `None`; an unreadable key file is an error.
    pub fn resolve(&self) -> Result<Option<String>> {
        let AuthConfig::ApiKey { key_file, key_env } = self else {
            return Ok(None);
        };

        if let Some(path) = key_file
            && let Some(key) = read_key_file(&expand_home(path))?
        {
            return Ok(Some(key));
        }

        Ok(key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .and_then(non_blank))
    }
}

fn read_key_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(non_blank(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Replace a leading `~/` with the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
