//! Reading and writing `client.yaml`.

use std::path::{Path, PathBuf};

use crate::{ClientConfig, ConfigError, Result};

const CLIENT_CONFIG_FILE: &str = "client.yaml";

/// Location of `client.yaml` inside the config directory.
pub fn client_config_path() -> Option<PathBuf> {
    crate::config_dir().map(|dir| dir.join(CLIENT_CONFIG_FILE))
}

/// Load `client.yaml`, or an empty config when there is none yet.
pub fn load_client_config() -> Result<ClientConfig> {
    load_client_config_from(client_config_path().as_deref())
}

pub fn load_client_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::new());
    };

    match std::fs::read_to_string(path) {
        Ok(yaml) => {
            tracing::debug!(path = %path.display(), "loaded client config");
            ClientConfig::from_yaml(&yaml)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::new()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn save_client_config(config: &ClientConfig) -> Result<()> {
    let path = client_config_path().ok_or(ConfigError::NoConfigDir)?;
    save_client_config_to(config, &path)
}

/// Write the config, creating parent directories.
///
/// The document goes to a sibling temp file first and is renamed into
/// place, so readers never see a half-written file.
pub fn save_client_config_to(config: &ClientConfig, path: &Path) -> Result<()> {
    let yaml = config.to_yaml()?;
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ConfigError::Write { path, source }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(write_err(parent))?;
    }

    let staging = path.with_extension("yaml.tmp");
    std::fs::write(&staging, yaml).map_err(write_err(&staging))?;
    std::fs::rename(&staging, path).map_err(write_err(path))?;

    tracing::debug!(path = %path.display(), contexts = config.contexts.len(), "saved client config");
    Ok(())
}
