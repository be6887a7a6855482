//! Configuration module for Relay
//!
//! Handles loading and parsing of `.relay.toml` configuration files
//! with support for environment variable expansion.

mod loader;
mod types;
mod writer;

pub use loader::{load_config, load_from_file, sample_config, ConfigError};
pub use types::{ContextConfig, ExcerptLimits, LlmConfig, RelayConfig};
pub use writer::{config_path, save_config, user_config_path};
