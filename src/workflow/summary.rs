use super::definition::Workflow;
use std::fmt;

/// Renders a translated workflow as a human-readable listing.
///
/// ```rust,no_run
/// use cacao_shuffle::workflow::{Workflow, WorkflowSummary};
///
/// let workflow = Workflow::default();
/// println!("{}", WorkflowSummary(&workflow));
/// ```
pub struct WorkflowSummary<'a>(pub &'a Workflow);

impl fmt::Display for WorkflowSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let workflow = self.0;
        writeln!(f, "======== WORKFLOW: {} ({}) ========", workflow.name, workflow.id)?;
        writeln!(f, "Start: {}", display_or_none(&workflow.start))?;

        writeln!(f, "\n--- ACTIONS ({}) ---", workflow.actions.len())?;
        for action in &workflow.actions {
            let marker = if action.is_start_node { "*" } else { " " };
            write!(
                f,
                "{} {:<36}  {:<24} {}/{}",
                marker,
                action.id,
                action.label,
                action.app_name,
                display_or_none(&action.name)
            )?;
            if let Some(url) = action.parameter("url") {
                write!(f, " {}", url.value)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\n--- BRANCHES ({}) ---", workflow.branches.len())?;
        for branch in &workflow.branches {
            let dangling = if workflow.action(&branch.destination_id).is_none() {
                " (dangling)"
            } else {
                ""
            };
            writeln!(
                f,
                "  {} -> {}  [{}]{}",
                branch.source_id, branch.destination_id, branch.label, dangling
            )?;
        }
        Ok(())
    }
}

fn display_or_none(value: &str) -> &str {
    if value.is_empty() { "<none>" } else { value }
}
