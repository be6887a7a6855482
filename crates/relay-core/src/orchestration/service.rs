//! Pipeline controller
//!
//! Runs the four stages in order, threading each output into the next
//! prompt, then persists all four at once.

use super::{
    architect::build_architect_prompt,
    data_engineer::build_data_engineer_prompt,
    integrator::build_integrator_prompt,
    state::PipelineState,
    types::{AgentDefinition, CompletedStages, Role, StageOutputs},
    ui_developer::build_ui_developer_prompt,
};
use crate::config::{ExcerptLimits, RelayConfig};
use crate::context::{ContextBundle, ContextKey};
use crate::error::{RelayError, Result};
use crate::llm::{AgentRunner, ChatClient, OpenAiClient};
use crate::output::OutputWriter;
use std::path::PathBuf;

/// What a stage's prompt builder may look at
pub struct StageInput<'a> {
    pub context: &'a ContextBundle,
    pub outputs: &'a StageOutputs,
    pub limits: &'a ExcerptLimits,
}

type BuildPrompt = fn(&StageInput<'_>) -> Result<String>;

/// The pipeline, in execution order
const STAGES: [(Role, BuildPrompt); 4] = [
    (Role::Architect, architect_stage),
    (Role::DataEngineer, data_engineer_stage),
    (Role::UiDeveloper, ui_developer_stage),
    (Role::Integrator, integrator_stage),
];

fn architect_stage(input: &StageInput<'_>) -> Result<String> {
    Ok(build_architect_prompt(input.context, input.limits))
}

fn data_engineer_stage(input: &StageInput<'_>) -> Result<String> {
    let design = input.outputs.require(Role::Architect)?;
    Ok(build_data_engineer_prompt(input.context, design, input.limits))
}

fn ui_developer_stage(input: &StageInput<'_>) -> Result<String> {
    let design = input.outputs.require(Role::Architect)?;
    Ok(build_ui_developer_prompt(input.context, design, input.limits))
}

fn integrator_stage(input: &StageInput<'_>) -> Result<String> {
    Ok(build_integrator_prompt(
        input.outputs.require(Role::Architect)?,
        input.outputs.require(Role::DataEngineer)?,
        input.outputs.require(Role::UiDeveloper)?,
    ))
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub outputs: CompletedStages,
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// Context documents that were replaced by placeholders
    pub degraded_context: Vec<ContextKey>,
    pub state: PipelineState,
}

/// Pipeline over a chat client
pub struct Pipeline<C> {
    config: RelayConfig,
    runner: AgentRunner<C>,
}

impl Pipeline<OpenAiClient> {
    /// Pipeline talking to the configured OpenAI-compatible endpoint
    pub fn openai(config: RelayConfig) -> Result<Self> {
        // the client only refuses a config without a usable key
        let client = OpenAiClient::from_config(&config.llm)
            .map_err(|_| RelayError::Config(crate::config::ConfigError::MissingApiKey))?;
        Self::new(config, client)
    }
}

impl<C: ChatClient> Pipeline<C> {
    /// Create a pipeline; the config is validated here, before any request
    pub fn new(config: RelayConfig, client: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            runner: AgentRunner::new(client),
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        self.runner.client()
    }

    /// Agent definition for a role on the configured model
    pub fn agent(&self, role: Role) -> AgentDefinition {
        role.definition(&self.config.llm.model)
    }

    /// Load the configured context documents
    pub fn load_context(&self) -> ContextBundle {
        tracing::info!("Gathering context from {}", self.config.workspace.display());
        let bundle = ContextBundle::load(&self.config.context_sources());
        if bundle.placeholder_count() > 0 {
            tracing::warn!(
                "{} of {} context documents unavailable, continuing with placeholders",
                bundle.placeholder_count(),
                bundle.len()
            );
        }
        bundle
    }

    /// Run all four stages; nothing is written
    ///
    /// The first failing stage aborts the run and its error names the role.
    pub fn run_stages(&self, context: &ContextBundle) -> Result<CompletedStages> {
        let mut state = PipelineState::Start;
        let mut outputs = StageOutputs::new();

        for (role, build_prompt) in STAGES {
            let prompt = build_prompt(&StageInput {
                context,
                outputs: &outputs,
                limits: &self.config.limits,
            })?;

            tracing::info!(
                stage = role.stage_number(),
                "{} running ({})",
                role,
                self.config.llm.model
            );
            tracing::debug!(stage = role.stage_number(), chars = prompt.chars().count(), "Prompt built");

            let agent = self.agent(role);
            let text = self
                .runner
                .run(&agent, &prompt)
                .map_err(|e| RelayError::stage(role, e))?;

            tracing::info!(
                stage = role.stage_number(),
                "{} complete, output length: {} chars",
                role,
                text.chars().count()
            );

            outputs.record(role, text)?;
            state = state.transition(PipelineState::after(role))?;
        }

        debug_assert_eq!(state, PipelineState::IntegratorDone);
        outputs
            .complete()
            .ok_or(RelayError::MissingOutput(Role::Integrator))
    }

    /// Full run: load context, run every stage, persist
    pub fn run(&self) -> Result<PipelineReport> {
        let context = self.load_context();
        self.run_with_context(&context)
    }

    /// Run every stage against an already loaded bundle, then persist
    pub fn run_with_context(&self, context: &ContextBundle) -> Result<PipelineReport> {
        let outputs = self.run_stages(context)?;

        let writer = OutputWriter::new(self.config.output_path());
        let files = writer.write(&outputs)?;
        let state = PipelineState::IntegratorDone.transition(PipelineState::Persisted)?;
        tracing::info!("All outputs saved to {}", writer.dir().display());

        Ok(PipelineReport {
            outputs,
            files,
            output_dir: writer.dir().to_path_buf(),
            degraded_context: context
                .iter()
                .filter(|d| d.is_placeholder())
                .map(|d| d.key)
                .collect(),
            state,
        })
    }
}
