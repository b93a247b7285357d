//! Configuration error types.

use std::path::PathBuf;

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while reading, writing or querying the client config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config or key file exists but could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file could not be written.
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid client config YAML.
    #[error("invalid client config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file declares a format this build does not understand.
    #[error("unsupported client config: {field} is '{found}', expected '{expected}'")]
    Unsupported {
        field: &'static str,
        found: String,
        expected: &'static str,
    },

    /// No context with the given name.
    #[error("context '{0}' not found")]
    ContextNotFound(String),

    /// No platform config directory and no `MALLOY_CONFIG_DIR`.
    #[error("no config directory; set MALLOY_CONFIG_DIR")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::ContextNotFound("prod".to_string());
        assert_eq!(err.to_string(), "context 'prod' not found");

        let err = ConfigError::Read {
            path: PathBuf::from("/tmp/missing.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/missing.yaml"));

        let err = ConfigError::Unsupported {
            field: "kind",
            found: "Pod".to_string(),
            expected: "ClientConfig",
        };
        assert!(err.to_string().contains("'Pod'"));
    }
}
