//! Pipeline state machine
//!
//! Strictly linear: every state has exactly one successor and there is no
//! way back.

use super::types::Role;
use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Start,
    ArchitectDone,
    DataEngineerDone,
    UiDone,
    IntegratorDone,
    Persisted,
}

impl PipelineState {
    /// The only state reachable from this one
    pub fn next(&self) -> Option<PipelineState> {
        match self {
            PipelineState::Start => Some(PipelineState::ArchitectDone),
            PipelineState::ArchitectDone => Some(PipelineState::DataEngineerDone),
            PipelineState::DataEngineerDone => Some(PipelineState::UiDone),
            PipelineState::UiDone => Some(PipelineState::IntegratorDone),
            PipelineState::IntegratorDone => Some(PipelineState::Persisted),
            PipelineState::Persisted => None,
        }
    }

    /// State reached once `role` has produced output
    pub fn after(role: Role) -> PipelineState {
        match role {
            Role::Architect => PipelineState::ArchitectDone,
            Role::DataEngineer => PipelineState::DataEngineerDone,
            Role::UiDeveloper => PipelineState::UiDone,
            Role::Integrator => PipelineState::IntegratorDone,
        }
    }

    /// Move to `to`, which must be the immediate successor
    pub fn transition(self, to: PipelineState) -> Result<PipelineState> {
        if self.next() == Some(to) {
            tracing::debug!("Pipeline {:?} -> {:?}", self, to);
            Ok(to)
        } else {
            Err(RelayError::InvalidTransition { from: self, to })
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Persisted)
    }
}
