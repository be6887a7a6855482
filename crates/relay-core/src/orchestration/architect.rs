//! Architect Agent
//!
//! Designs the task relationship data structure from the board and the schema spec.

use super::excerpt::{excerpt, fenced};
use crate::config::ExcerptLimits;
use crate::context::{ContextBundle, ContextKey};

pub(crate) const INSTRUCTIONS: &str = r#"You are an expert schema architect. Your job is to design the task relationships data structure.

Given the current board.json structure and the v3.1 schema spec, design:
1. How to add relationships to tasks (dependencies, subtasks, parent)
2. The data format for each relationship type
3. Validation rules (no cycles, valid references)
4. UI implications (how this displays in the kanban board)

Output your design as a clear JSON schema and migration plan. Be specific about field names and types."#;

/// Build the stage 1 prompt
pub fn build_architect_prompt(context: &ContextBundle, limits: &ExcerptLimits) -> String {
    format!(
        r#"Design the task relationships structure for Command Center v3.1.

CURRENT board.json structure:
{board}

SCHEMA SPEC (relevant section):
{spec}...

Requirements:
1. Add relationships object to tasks with: parent, subtasks list, dependencies dict
2. Dependencies need types: blocks, blockedBy, related, duplicates, supersedes
3. Must support cyclic dependency detection
4. Must be backward compatible with v3.0

Output:
1. JSON schema for task relationships
2. Example task with full relationships
3. Migration plan from current tasks"#,
        board = fenced("json", context.text(ContextKey::Board), limits.architect_board),
        spec = excerpt(context.text(ContextKey::SchemaSpec), limits.architect_spec),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_capped_board_and_spec() {
        let board = "B".repeat(50) + &"~".repeat(50);
        let spec = "S".repeat(30) + &"@".repeat(30);
        let context = ContextBundle::from_texts([
            (ContextKey::Board, board.as_str()),
            (ContextKey::SchemaSpec, spec.as_str()),
        ]);
        let limits = ExcerptLimits {
            architect_board: 50,
            architect_spec: 30,
            ..ExcerptLimits::default()
        };

        let prompt = build_architect_prompt(&context, &limits);

        assert!(prompt.contains(&format!("```json\n{}...\n```", "B".repeat(50))));
        assert!(prompt.contains(&format!("SCHEMA SPEC (relevant section):\n{}...", "S".repeat(30))));
        assert!(!prompt.contains('~'));
        assert!(!prompt.contains('@'));
    }

    #[test]
    fn test_placeholder_passed_through() {
        let dir = tempfile::TempDir::new().unwrap();
        let context = ContextBundle::load(&[(ContextKey::Board, dir.path().join("board.json"))]);

        let prompt = build_architect_prompt(&context, &ExcerptLimits::default());
        assert!(prompt.contains("Error reading"));
    }
}
