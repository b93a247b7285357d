//! Client configuration for Malloy Publisher tools.
//!
//! A single YAML file (`<config dir>/client.yaml`) holds named contexts.
//! Each context points at one Publisher and says how to authenticate
//! against it. The `current-context` key picks the one used by default.
//!
//! ```yaml
//! api-version: v1
//! kind: ClientConfig
//! current-context: local
//! contexts:
//!   - name: local
//!     server: http://localhost:4000
//!   - name: prod
//!     server: https://publisher.example.com
//!     auth:
//!       type: api-key
//!       key-file: ~/.config/malloy/keys/prod.key
//!     timeout: 60
//! defaults:
//!   timeout: 30
//! ```
//!
//! API keys are never stored inline; a context names a key file or an
//! environment variable and [`AuthConfig::resolve`] reads it on demand.

pub mod auth;
pub mod contexts;
pub mod discovery;
pub mod error;
pub mod store;

pub use auth::AuthConfig;
pub use contexts::{ClientConfig, ClientDefaults, Context};
pub use discovery::config_dir;
pub use error::{ConfigError, Result};
pub use store::{
    client_config_path, load_client_config, load_client_config_from, save_client_config,
    save_client_config_to,
};
