//! Error types for Relay Core
//!
//! Provides a unified error type for pipeline operations. Context reads are
//! not represented here: a failed read degrades to a placeholder instead.

use crate::config::ConfigError;
use crate::llm::LlmError;
use crate::orchestration::{PipelineState, Role};
use thiserror::Error;

/// Result type for Relay Core operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Unified error type for Relay Core
#[derive(Error, Debug)]
pub enum RelayError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A stage's model invocation failed
    #[error("{role} stage failed: {source}")]
    Stage {
        role: Role,
        #[source]
        source: LlmError,
    },

    /// The pipeline was asked to move somewhere other than the next state
    #[error("Invalid pipeline transition from {from:?} to {to:?}")]
    InvalidTransition { from: PipelineState, to: PipelineState },

    /// A stage output was recorded out of sequence
    #[error("Stage output out of order: expected {expected:?}, got {got}")]
    OutOfOrder { expected: Option<Role>, got: Role },

    /// A prompt needed an output that has not been produced
    #[error("No output from the {0} stage yet")]
    MissingOutput(Role),

    /// Writing stage outputs failed
    #[error("Failed to write {path}: {message}")]
    Output { path: String, message: String },
}

impl RelayError {
    /// Create a stage error for the given role
    pub fn stage(role: Role, source: LlmError) -> Self {
        RelayError::Stage { role, source }
    }

    /// Create an output error for a path
    pub fn output(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        RelayError::Output {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// The role whose stage failed, if this is a stage error
    pub fn failed_role(&self) -> Option<Role> {
        match self {
            RelayError::Stage { role, .. } => Some(*role),
            _ => None,
        }
    }
}
