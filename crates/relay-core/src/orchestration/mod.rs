//! Agent Orchestration
//!
//! A fixed four-stage chain of role agents:
//! - Architect: designs the task relationship structure
//! - Data Engineer: implements it in the board data
//! - UI Developer: implements the frontend
//! - Integrator: reviews and combines the three
//!
//! # Example
//!
//! ```no_run
//! use relay_core::config::RelayConfig;
//! use relay_core::orchestration::Pipeline;
//!
//! let mut config = RelayConfig::for_workspace("/my/workspace");
//! config.llm.api_key = Some("sk-...".to_string());
//!
//! let pipeline = Pipeline::openai(config).unwrap();
//! let report = pipeline.run().unwrap();
//! println!("Wrote {} files to {}", report.files.len(), report.output_dir.display());
//! ```

mod architect;
mod data_engineer;
mod excerpt;
mod integrator;
mod service;
mod state;
mod types;
mod ui_developer;

pub use types::{AgentDefinition, CompletedStages, Role, StageOutputs};

pub use state::PipelineState;

pub use service::{Pipeline, PipelineReport, StageInput};

// Prompt builders
pub use architect::build_architect_prompt;
pub use data_engineer::build_data_engineer_prompt;
pub use excerpt::excerpt;
pub use integrator::build_integrator_prompt;
pub use ui_developer::build_ui_developer_prompt;
