//! Orchestration types
//!
//! Roles, agent definitions and the stage output record.

use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};

/// Agent roles, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Designs the relationship data structure
    Architect,
    /// Implements the data layer
    DataEngineer,
    /// Implements the frontend
    UiDeveloper,
    /// Reviews and combines everything
    Integrator,
}

impl Role {
    /// All roles, in execution order
    pub const ALL: [Role; 4] = [
        Role::Architect,
        Role::DataEngineer,
        Role::UiDeveloper,
        Role::Integrator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Architect => "architect",
            Role::DataEngineer => "data_engineer",
            Role::UiDeveloper => "ui_developer",
            Role::Integrator => "integrator",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Architect => "Architect",
            Role::DataEngineer => "Data Engineer",
            Role::UiDeveloper => "UI Developer",
            Role::Integrator => "Integrator",
        }
    }

    /// 1-based position in the pipeline
    pub fn stage_number(&self) -> usize {
        match self {
            Role::Architect => 1,
            Role::DataEngineer => 2,
            Role::UiDeveloper => 3,
            Role::Integrator => 4,
        }
    }

    /// Name the agent is registered under
    pub fn agent_name(&self) -> &'static str {
        match self {
            Role::Architect => "Phase3-Architect",
            Role::DataEngineer => "Phase3-DataEngineer",
            Role::UiDeveloper => "Phase3-UIDeveloper",
            Role::Integrator => "Phase3-Integrator",
        }
    }

    /// Markdown file the stage output is written to
    pub fn file_name(&self) -> &'static str {
        match self {
            Role::Architect => "01-architect-design.md",
            Role::DataEngineer => "02-data-engineer.md",
            Role::UiDeveloper => "03-ui-developer.md",
            Role::Integrator => "04-integrator-final.md",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            Role::Architect => super::architect::INSTRUCTIONS,
            Role::DataEngineer => super::data_engineer::INSTRUCTIONS,
            Role::UiDeveloper => super::ui_developer::INSTRUCTIONS,
            Role::Integrator => super::integrator::INSTRUCTIONS,
        }
    }

    /// The agent for this role on `model`
    pub fn definition(&self, model: &str) -> AgentDefinition {
        AgentDefinition {
            name: self.agent_name().to_string(),
            instructions: self.instructions().to_string(),
            model: model.to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Static agent definition: who it is, what it is told, which model runs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub instructions: String,
    pub model: String,
}

/// Outputs produced so far, in order
///
/// Only the next role in sequence may be recorded, so a stage can never see
/// a result that has not been produced yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutputs {
    outputs: Vec<(Role, String)>,
}

impl StageOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// The role whose output is due next
    pub fn next_role(&self) -> Option<Role> {
        Role::ALL.get(self.outputs.len()).copied()
    }

    /// Append the output of the next role
    pub fn record(&mut self, role: Role, output: String) -> Result<()> {
        if self.next_role() != Some(role) {
            return Err(RelayError::OutOfOrder {
                expected: self.next_role(),
                got: role,
            });
        }
        self.outputs.push((role, output));
        Ok(())
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, text)| text.as_str())
    }

    /// Output of an earlier stage that the current prompt depends on
    pub fn require(&self, role: Role) -> Result<&str> {
        self.get(role).ok_or(RelayError::MissingOutput(role))
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Seal the record once every role has produced output
    pub fn complete(self) -> Option<CompletedStages> {
        if self.outputs.len() != Role::ALL.len() {
            return None;
        }
        let mut texts = self.outputs.into_iter().map(|(_, text)| text);
        Some(CompletedStages {
            architect_design: texts.next()?,
            data_implementation: texts.next()?,
            ui_implementation: texts.next()?,
            final_output: texts.next()?,
        })
    }
}

/// All four stage outputs
///
/// Only obtainable from a full `StageOutputs`, which is what the output
/// writer takes, so partial results cannot reach disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedStages {
    pub architect_design: String,
    pub data_implementation: String,
    pub ui_implementation: String,
    pub final_output: String,
}

impl CompletedStages {
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Architect => &self.architect_design,
            Role::DataEngineer => &self.data_implementation,
            Role::UiDeveloper => &self.ui_implementation,
            Role::Integrator => &self.final_output,
        }
    }

    /// (role, output) pairs in stage order
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}
