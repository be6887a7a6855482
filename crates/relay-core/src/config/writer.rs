//! Configuration file locations and saving

use super::loader::{sample_config, ConfigError};
use super::types::RelayConfig;
use std::path::{Path, PathBuf};

/// Workspace-level config file
pub fn config_path(workspace: &Path) -> PathBuf {
    workspace.join(".relay.toml")
}

/// User-level config file (`~/.config/relay/config.toml`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("relay").join("config.toml"))
}

/// Save a configuration to `path`
///
/// `None` writes the commented sample instead of a serialized config.
/// Writes through a temp file so a reader never sees a half-written file.
pub fn save_config(path: &Path, config: Option<&RelayConfig>) -> Result<(), ConfigError> {
    let content = match config {
        Some(config) => toml::to_string_pretty(config)?,
        None => sample_config().to_string(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)?;

    tracing::info!("Wrote config to {}", path.display());
    Ok(())
}
