//! Configuration types for Relay
//!
//! Defines the structure of `.relay.toml` configuration.

use super::loader::ConfigError;
use crate::context::ContextKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Workspace root; relative context and output paths resolve against it
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// Directory for stage outputs, relative to the workspace
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Context file locations
    #[serde(default)]
    pub context: ContextConfig,

    /// Excerpt caps, in characters
    #[serde(default)]
    pub limits: ExcerptLimits,
}

fn default_workspace() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".codex-tasks/phase3-swarm")
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            workspace: default_workspace(),
            output_dir: default_output_dir(),
            llm: LlmConfig::default(),
            context: ContextConfig::default(),
            limits: ExcerptLimits::default(),
        }
    }
}

/// LLM configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used by every agent
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout: default_timeout(),
        }
    }
}

impl LlmConfig {
    /// The API key, if one is set and fully expanded
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.contains("${"))
    }
}

/// Paths of the context documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default = "default_board")]
    pub board: PathBuf,

    #[serde(default = "default_projects")]
    pub projects: PathBuf,

    #[serde(default = "default_agents")]
    pub agents: PathBuf,

    #[serde(default = "default_schema_spec")]
    pub schema_spec: PathBuf,

    #[serde(default = "default_markup")]
    pub markup: PathBuf,
}

fn default_board() -> PathBuf {
    ContextKey::Board.default_path().into()
}

fn default_projects() -> PathBuf {
    ContextKey::Projects.default_path().into()
}

fn default_agents() -> PathBuf {
    ContextKey::Agents.default_path().into()
}

fn default_schema_spec() -> PathBuf {
    ContextKey::SchemaSpec.default_path().into()
}

fn default_markup() -> PathBuf {
    ContextKey::Markup.default_path().into()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            board: default_board(),
            projects: default_projects(),
            agents: default_agents(),
            schema_spec: default_schema_spec(),
            markup: default_markup(),
        }
    }
}

impl ContextConfig {
    /// Configured path for a context document
    pub fn path(&self, key: ContextKey) -> &Path {
        match key {
            ContextKey::Board => &self.board,
            ContextKey::Projects => &self.projects,
            ContextKey::Agents => &self.agents,
            ContextKey::SchemaSpec => &self.schema_spec,
            ContextKey::Markup => &self.markup,
        }
    }
}

/// Character caps applied to context excerpts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptLimits {
    /// Board excerpt shown to the architect
    #[serde(default = "default_architect_board")]
    pub architect_board: usize,

    /// Schema spec excerpt shown to the architect
    #[serde(default = "default_architect_spec")]
    pub architect_spec: usize,

    /// Board excerpt shown to the data engineer
    #[serde(default = "default_engineer_board")]
    pub engineer_board: usize,

    /// Markup excerpt shown to the UI developer
    #[serde(default = "default_ui_markup")]
    pub ui_markup: usize,
}

fn default_architect_board() -> usize {
    2000
}

fn default_architect_spec() -> usize {
    3000
}

fn default_engineer_board() -> usize {
    1500
}

fn default_ui_markup() -> usize {
    2000
}

impl Default for ExcerptLimits {
    fn default() -> Self {
        Self {
            architect_board: default_architect_board(),
            architect_spec: default_architect_spec(),
            engineer_board: default_engineer_board(),
            ui_markup: default_ui_markup(),
        }
    }
}

impl RelayConfig {
    /// Create a default config rooted at a workspace
    pub fn for_workspace(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            ..Self::default()
        }
    }

    /// Absolute (or workspace-relative) output directory
    pub fn output_path(&self) -> PathBuf {
        self.workspace.join(&self.output_dir)
    }

    /// Context sources resolved against the workspace, in load order
    pub fn context_sources(&self) -> Vec<(ContextKey, PathBuf)> {
        ContextKey::ALL
            .iter()
            .map(|&key| (key, self.workspace.join(self.context.path(key))))
            .collect()
    }

    /// Check the config before any work starts
    ///
    /// A missing credential fails here rather than at the first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.resolved_api_key().is_none() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".into()));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.base_url must not be empty".into()));
        }
        if self.llm.timeout == 0 {
            return Err(ConfigError::Invalid("llm.timeout must be at least 1 second".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_key(key: &str) -> RelayConfig {
        let mut config = RelayConfig::default();
        config.llm.api_key = Some(key.to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.timeout, 120);
        assert_eq!(config.limits.architect_spec, 3000);
        assert_eq!(config.context.schema_spec, PathBuf::from("docs/SCHEMA-V3.1-SPEC.md"));
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = RelayConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_unexpanded_api_key_fails_validation() {
        let config = with_key("${OPENAI_API_KEY}");
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));

        let config = with_key("   ");
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_valid_config() {
        assert!(with_key("sk-test").validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = with_key("sk-test");
        config.llm.timeout = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_context_sources_resolve_against_workspace() {
        let config = RelayConfig::for_workspace("/work");
        let sources = config.context_sources();
        assert_eq!(sources.len(), 5);
        assert_eq!(sources[0], (ContextKey::Board, PathBuf::from("/work/board.json")));
        assert_eq!(
            sources[3],
            (ContextKey::SchemaSpec, PathBuf::from("/work/docs/SCHEMA-V3.1-SPEC.md"))
        );
    }

    #[test]
    fn test_absolute_context_path_kept() {
        let mut config = RelayConfig::for_workspace("/work");
        config.context.markup = PathBuf::from("/elsewhere/index.html");
        let sources = config.context_sources();
        assert_eq!(sources[4].1, PathBuf::from("/elsewhere/index.html"));
    }

    #[test]
    fn test_output_path() {
        let config = RelayConfig::for_workspace("/work");
        assert_eq!(config.output_path(), PathBuf::from("/work/.codex-tasks/phase3-swarm"));
    }
}
