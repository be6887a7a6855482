//! Data Engineer Agent
//!
//! Turns the architect's design into board.json changes and validation code.

use super::excerpt::fenced;
use crate::config::ExcerptLimits;
use crate::context::{ContextBundle, ContextKey};

pub(crate) const INSTRUCTIONS: &str = r#"You are a data engineer. Your job is to implement the task relationships in board.json.

Take the architect's design and:
1. Update board.json to include relationship fields on existing tasks
2. Create example task relationships for testing
3. Ensure backward compatibility (v3.0 clients still work)
4. Write validation logic (check for circular dependencies)

Output the actual JSON changes and any JavaScript validation functions."#;

/// Build the stage 2 prompt; `design` is embedded in full
pub fn build_data_engineer_prompt(
    context: &ContextBundle,
    design: &str,
    limits: &ExcerptLimits,
) -> String {
    format!(
        r#"Implement the task relationships based on this design:

{design}

CURRENT board.json:
{board}

Requirements:
1. Update existing tasks with relationship fields
2. Create 2-3 example relationships between existing tasks
3. Write JavaScript validation function for circular dependencies
4. Ensure backward compatibility

Output:
1. Updated board.json snippet showing relationship fields
2. Example task with full relationships
3. Validation function code"#,
        design = design,
        board = fenced("json", context.text(ContextKey::Board), limits.engineer_board),
    )
}
