//! Configuration loader with environment variable expansion
//!
//! Loads configuration from an explicit path, `.relay.toml` in the workspace
//! root, or the user config directory.

use super::types::RelayConfig;
use super::writer::{config_path, user_config_path};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("No API key configured: set OPENAI_API_KEY or llm.api_key")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Load configuration from various sources
///
/// Priority order:
/// 1. `explicit` path, when given (must exist)
/// 2. Workspace-level `.relay.toml`
/// 3. User-level `~/.config/relay/config.toml`
/// 4. Default configuration
///
/// Environment overrides are applied last in every case.
///
/// With `pinned` set, `workspace` came from the command line and replaces
/// whatever `workspace` the file names. Otherwise a relative file value is
/// resolved against `workspace` and an absolute one is kept.
pub fn load_config(
    workspace: &Path,
    explicit: Option<&Path>,
    pinned: bool,
) -> Result<RelayConfig, ConfigError> {
    let config = if let Some(path) = explicit {
        load_from_file(path)?
    } else if config_path(workspace).exists() {
        load_from_file(&config_path(workspace))?
    } else {
        match user_config_path() {
            Some(user_config) if user_config.exists() => load_from_file(&user_config)?,
            _ => RelayConfig::default(),
        }
    };

    let config = if pinned {
        RelayConfig {
            workspace: workspace.to_path_buf(),
            ..config
        }
    } else {
        anchor_workspace(config, workspace)
    };
    Ok(apply_env_overrides(config, |name| std::env::var(name).ok()))
}

/// Load configuration from a specific file
pub fn load_from_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    tracing::debug!("Loading config from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let mut config: RelayConfig = toml::from_str(&content)?;

    expand_env_vars(&mut config);

    Ok(config)
}

/// Resolve a relative `workspace` entry against the workspace directory
fn anchor_workspace(mut config: RelayConfig, workspace: &Path) -> RelayConfig {
    if config.workspace == Path::new(".") {
        config.workspace = workspace.to_path_buf();
    } else if config.workspace.is_relative() {
        config.workspace = workspace.join(&config.workspace);
    }
    config
}

fn env_regex() -> &'static Regex {
    static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
    ENV_REGEX.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// Expand ${VAR} patterns in string values
fn expand_env_vars(config: &mut RelayConfig) {
    let lookup = |name: &str| std::env::var(name).ok();

    if let Some(ref api_key) = config.llm.api_key {
        config.llm.api_key = Some(expand_string(api_key, &lookup));
    }
    config.llm.base_url = expand_string(&config.llm.base_url, &lookup);
}

/// Expand environment variables in a single string
///
/// Unknown variables are left as written.
fn expand_string(s: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    env_regex()
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Apply environment variable overrides
///
/// A non-empty variable always wins over the file value:
/// - OPENAI_API_KEY -> llm.api_key
/// - OPENAI_BASE_URL -> llm.base_url
/// - RELAY_MODEL -> llm.model
fn apply_env_overrides(
    mut config: RelayConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> RelayConfig {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(key) = non_empty("OPENAI_API_KEY") {
        config.llm.api_key = Some(key);
    }

    if let Some(url) = non_empty("OPENAI_BASE_URL") {
        config.llm.base_url = url;
    }

    if let Some(model) = non_empty("RELAY_MODEL") {
        config.llm.model = model;
    }

    config
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Relay Configuration
# Place this file in your workspace root as .relay.toml
# or in ~/.config/relay/config.toml for global settings

# Workspace root; "." means the directory passed with --workspace
workspace = "."

# Where the four stage outputs are written, relative to the workspace
output_dir = ".codex-tasks/phase3-swarm"

[llm]
api_key = "${OPENAI_API_KEY}"
base_url = "https://api.openai.com/v1"
model = "gpt-4o"

# Request timeout in seconds
timeout = 120

# Context documents, relative to the workspace
[context]
board = "board.json"
projects = "projects.json"
agents = "agents.json"
schema_spec = "docs/SCHEMA-V3.1-SPEC.md"
markup = "index.html"

# Excerpt caps in characters
[limits]
architect_board = 2000
architect_spec = 3000
engineer_board = 1500
ui_markup = 2000
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_sample_config_parses() {
        let config: RelayConfig = toml::from_str(sample_config()).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.limits.engineer_board, 1500);
        assert_eq!(config.output_dir, PathBuf::from(".codex-tasks/phase3-swarm"));
    }

    #[test]
    fn test_expand_env_var() {
        let lookup = lookup_from(&[("TEST_VAR", "test_value")]);
        let result = expand_string("prefix_${TEST_VAR}_suffix", &lookup);
        assert_eq!(result, "prefix_test_value_suffix");
    }

    #[test]
    fn test_missing_env_var() {
        let lookup = lookup_from(&[]);
        let result = expand_string("${NONEXISTENT_VAR}", &lookup);
        assert_eq!(result, "${NONEXISTENT_VAR}");
    }

    #[test]
    fn test_env_api_key_fills_unresolved_key() {
        let mut config = RelayConfig::default();
        config.llm.api_key = Some("${SOMETHING_UNSET}".to_string());

        let config = apply_env_overrides(config, lookup_from(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_env_wins_over_file_values() {
        let mut config = RelayConfig::default();
        config.llm.api_key = Some("sk-file".to_string());
        config.llm.base_url = "https://file.example/v1".to_string();
        config.llm.model = "file-model".to_string();

        let config = apply_env_overrides(
            config,
            lookup_from(&[
                ("OPENAI_API_KEY", "sk-env"),
                ("OPENAI_BASE_URL", "https://env.example/v1"),
                ("RELAY_MODEL", "env-model"),
            ]),
        );
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.llm.base_url, "https://env.example/v1");
        assert_eq!(config.llm.model, "env-model");
    }

    #[test]
    fn test_empty_env_keeps_file_values() {
        let mut config = RelayConfig::default();
        config.llm.api_key = Some("sk-file".to_string());

        let config = apply_env_overrides(
            config,
            lookup_from(&[("OPENAI_API_KEY", ""), ("RELAY_MODEL", "")]),
        );
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn test_model_and_base_url_overrides() {
        let config = apply_env_overrides(
            RelayConfig::default(),
            lookup_from(&[
                ("RELAY_MODEL", "gpt-4o-mini"),
                ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
                ("OPENAI_API_KEY", ""),
            ]),
        );
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_load_from_workspace_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            config_path(dir.path()),
            "output_dir = \"out\"\n[llm]\napi_key = \"sk-literal\"\nmodel = \"gpt-4o-mini\"\n",
        )
        .unwrap();

        let config = load_config(dir.path(), None, false).unwrap();
        assert_eq!(config.workspace, dir.path());
        assert_eq!(config.output_path(), dir.path().join("out"));
        assert_eq!(config.limits.ui_markup, 2000);
    }

    #[test]
    fn test_relative_workspace_anchored() {
        let config = RelayConfig {
            workspace: PathBuf::from("sub"),
            ..RelayConfig::default()
        };
        let config = anchor_workspace(config, Path::new("/root/project"));
        assert_eq!(config.workspace, PathBuf::from("/root/project/sub"));
    }

    #[test]
    fn test_command_line_workspace_beats_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "workspace = \"/somewhere/else\"\n").unwrap();

        let config = load_config(dir.path(), Some(&path), true).unwrap();
        assert_eq!(config.workspace, dir.path());
        assert_eq!(
            config.output_path(),
            dir.path().join(".codex-tasks/phase3-swarm")
        );
    }

    #[test]
    fn test_absolute_file_workspace_kept_without_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "workspace = \"/somewhere/else\"\n").unwrap();

        let config = load_config(dir.path(), Some(&path), false).unwrap();
        assert_eq!(config.workspace, PathBuf::from("/somewhere/else"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config(dir.path(), Some(&missing), false),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_parse_error_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[llm\nmodel = ").unwrap();
        assert!(matches!(load_from_file(&path), Err(ConfigError::ParseError(_))));
    }
}
