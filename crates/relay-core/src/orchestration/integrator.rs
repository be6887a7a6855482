//! Integrator Agent
//!
//! Reviews the three earlier outputs together and produces the final plan.

pub(crate) const INSTRUCTIONS: &str = r#"You are a technical lead. Your job is to review and integrate all outputs.

Review the architect's design, data engineer's implementation, and UI developer's code:
1. Check for consistency across all components
2. Identify any gaps or issues
3. Create a final implementation plan
4. Write the actual files to disk

Output a summary of changes and any warnings or recommendations."#;

/// Build the stage 4 prompt from every earlier output, untruncated
pub fn build_integrator_prompt(design: &str, data: &str, ui: &str) -> String {
    format!(
        r#"Review and integrate all components for Phase 3.

ARCHITECT DESIGN:
{design}

DATA ENGINEER IMPLEMENTATION:
{data}

UI DEVELOPER IMPLEMENTATION:
{ui}

Your task:
1. Check for consistency across all three outputs
2. Identify any missing pieces or issues
3. Create final file change summary
4. Write the actual implementation files

Output:
1. Integration summary (what's good, what needs fixing)
2. List of files to modify
3. Final implementation code for each file
4. Any warnings or recommendations"#,
    )
}
