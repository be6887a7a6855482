//! Relay Core - backend library for the relay pipeline
//!
//! Four role agents run one after another, each fed a prompt built from
//! local context documents and the outputs of the agents before it:
//!
//! ```text
//! context ─→ Architect ─→ Data Engineer ─→ UI Developer ─→ Integrator ─→ files
//!                │               ▲               ▲              ▲
//!                └───── design ──┴───────────────┴──────────────┘
//! ```
//!
//! - `context`: loads the reference documents, degrading unreadable ones
//!   to tagged placeholders
//! - `orchestration`: roles, prompt builders and the `Pipeline` controller
//! - `llm`: the `ChatClient` seam, the OpenAI client and the agent runner
//! - `output`: writes the four stage outputs
//! - `config`: `.relay.toml` loading with environment variable expansion
//!
//! # Example
//!
//! ```ignore
//! use relay_core::{load_config, Pipeline};
//!
//! let config = load_config(&workspace, None, true)?;
//! let report = Pipeline::openai(config)?.run()?;
//! for path in &report.files {
//!     println!("{}", path.display());
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod orchestration;
pub mod output;

// Re-export commonly used types
pub use config::{load_config, ConfigError, RelayConfig};
pub use context::{ContextBundle, ContextDocument, ContextKey, DocumentContent};
pub use error::{RelayError, Result};
pub use llm::{AgentRunner, ChatClient, ChatMessage, ChatRequest, LlmError, OpenAiClient};
pub use orchestration::{
    AgentDefinition, CompletedStages, Pipeline, PipelineReport, PipelineState, Role,
};
pub use output::OutputWriter;

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
