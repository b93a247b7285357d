//! Config directory discovery.

use std::path::PathBuf;

/// Application name for platform directory resolution.
const APP_NAME: &str = "malloy";

/// Environment variable that overrides the config directory.
///
/// Takes precedence over the platform default; useful for tests and for
/// keeping several independent setups side by side.
pub const CONFIG_DIR_ENV: &str = "MALLOY_CONFIG_DIR";

/// Get the config directory for malloy tools.
///
/// Checks `MALLOY_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/malloy` on Linux, `~/Library/Application Support/malloy` on macOS).
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
