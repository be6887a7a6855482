//! UI Developer Agent
//!
//! Implements the frontend for task relationships against the existing markup.

use super::excerpt::fenced;
use crate::config::ExcerptLimits;
use crate::context::{ContextBundle, ContextKey};

pub(crate) const INSTRUCTIONS: &str = r#"You are a frontend developer. Your job is to implement the UI for task relationships.

Given the data structure and existing index.html, implement:
1. Visual indicators for blocked/blocked-by tasks
2. Subtask display in task detail view
3. Dependency graph visualization (simple list or tree)
4. Drag-and-drop or buttons to create relationships

Output the HTML/CSS/JS changes needed. Follow existing code patterns in index.html."#;

/// Build the stage 3 prompt; `design` is embedded in full
pub fn build_ui_developer_prompt(
    context: &ContextBundle,
    design: &str,
    limits: &ExcerptLimits,
) -> String {
    format!(
        r#"Implement UI for task relationships.

DATA STRUCTURE:
{design}

CURRENT index.html (relevant sections):
{markup}

Requirements:
1. Show blocked status on kanban cards (visual indicator)
2. In task detail view, show:
   - Parent task (if subtask)
   - List of subtasks
   - Dependencies (what this blocks, what's blocking it)
   - Related tasks
3. Simple way to add dependencies (dropdown or search)

Follow existing CSS patterns. Output HTML/CSS/JS changes."#,
        design = design,
        markup = fenced("html", context.text(ContextKey::Markup), limits.ui_markup),
    )
}
