//! Named contexts and the client config document.

use serde::{Deserialize, Serialize};

use crate::{AuthConfig, ConfigError, Result};

/// Value of `api-version` this build reads and writes.
pub const API_VERSION: &str = "v1";

/// Value of `kind` this build reads and writes.
pub const KIND: &str = "ClientConfig";

/// The whole `client.yaml` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientConfig {
    #[serde(default = "api_version")]
    pub api_version: String,

    #[serde(default = "kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,

    #[serde(default)]
    pub contexts: Vec<Context>,

    #[serde(default)]
    pub defaults: ClientDefaults,
}

fn api_version() -> String {
    API_VERSION.to_string()
}

fn kind() -> String {
    KIND.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            api_version: api_version(),
            kind: kind(),
            current_context: None,
            contexts: Vec::new(),
            defaults: ClientDefaults::default(),
        }
    }

    /// Parse a config document, rejecting other formats and versions.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        if config.api_version != API_VERSION {
            return Err(ConfigError::Unsupported {
                field: "api-version",
                found: config.api_version,
                expected: API_VERSION,
            });
        }
        if config.kind != KIND {
            return Err(ConfigError::Unsupported {
                field: "kind",
                found: config.kind,
                expected: KIND,
            });
        }
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The context named by `current-context`, if it exists.
    pub fn current(&self) -> Option<&Context> {
        self.get_context(self.current_context.as_deref()?)
    }

    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Pick the context a command should run against.
    ///
    /// An explicit name must exist. Without one the current context is
    /// used, and having none at all is not an error.
    pub fn select(&self, name: Option<&str>) -> Result<Option<&Context>> {
        match name {
            Some(name) => self
                .get_context(name)
                .map(Some)
                .ok_or_else(|| ConfigError::ContextNotFound(name.to_string())),
            None => Ok(self.current()),
        }
    }

    /// Insert a context or replace the one with the same name.
    ///
    /// The first context added to an empty config becomes current.
    /// Returns `true` if the context is new.
    pub fn set_context(&mut self, context: Context) -> bool {
        if let Some(slot) = self.contexts.iter_mut().find(|c| c.name == context.name) {
            *slot = context;
            return false;
        }
        if self.contexts.is_empty() && self.current_context.is_none() {
            self.current_context = Some(context.name.clone());
        }
        self.contexts.push(context);
        true
    }

    /// Remove a context; `current-context` is cleared if it named it.
    pub fn remove_context(&mut self, name: &str) -> Option<Context> {
        let index = self.contexts.iter().position(|c| c.name == name)?;
        if self.current_context.as_deref() == Some(name) {
            self.current_context = None;
        }
        Some(self.contexts.remove(index))
    }

    pub fn use_context(&mut self, name: &str) -> Result<()> {
        if self.get_context(name).is_none() {
            return Err(ConfigError::ContextNotFound(name.to_string()));
        }
        self.current_context = Some(name.to_string());
        Ok(())
    }

    pub fn context_names(&self) -> Vec<&str> {
        self.contexts.iter().map(|c| c.name.as_str()).collect()
    }

    /// Timeout in seconds for `context`, falling back to `defaults`.
    pub fn effective_timeout(&self, context: &Context) -> u64 {
        context.timeout.unwrap_or(self.defaults.timeout)
    }
}

/// One Publisher endpoint and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Context {
    pub name: String,

    /// Base URL, e.g. `http://localhost:4000`.
    pub server: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Context {
    pub fn new(name: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            auth: None,
            timeout: None,
        }
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether requests from this context carry a bearer token.
    pub fn has_api_key(&self) -> bool {
        matches!(self.auth, Some(AuthConfig::ApiKey { .. }))
    }

    /// The API key for this context, if one is configured and present.
    pub fn api_key(&self) -> Result<Option<String>> {
        self.auth
            .as_ref()
            .map_or(Ok(None), |auth| auth.resolve())
    }
}

/// Settings shared by every context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientDefaults {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}
