use super::TranslatorOptions;
use super::diagnostics::Issue;
use super::expander::{CommandExpander, StepShape};
use super::ids::IdAllocator;
use super::parsing::CommandParser;
use super::resolver;
use crate::error::StepError;
use crate::playbook::{NodeKind, NodeRef, Playbook, Step};
use crate::workflow::{Action, Branch, Parameter};
use ahash::AHashMap;

/// Everything one step contributes to the workflow. Plans are computed
/// independently and merged afterwards.
#[derive(Debug, Default)]
pub(super) struct StepPlan {
    pub actions: Vec<Action>,
    pub branches: Vec<Branch>,
    /// Set when this step is a `start--` step.
    pub start: Option<String>,
    pub issues: Vec<Issue>,
}

pub(super) struct StepPlanner<'a> {
    playbook: &'a Playbook,
    options: &'a TranslatorOptions,
    expander: CommandExpander<'a>,
}

impl<'a> StepPlanner<'a> {
    pub fn new(
        playbook: &'a Playbook,
        registry: &'a AHashMap<String, Box<dyn CommandParser>>,
        options: &'a TranslatorOptions,
    ) -> Self {
        Self {
            playbook,
            options,
            expander: CommandExpander::new(registry, options),
        }
    }

    pub fn plan(
        &self,
        key: &str,
        step: &Step,
        ids: &mut dyn IdAllocator,
    ) -> Result<StepPlan, StepError> {
        let node = NodeRef::parse(key)?;
        let label = match &node.kind {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Action => step.name.as_str(),
            NodeKind::Other(prefix) => {
                return Err(StepError::UnsupportedStepKind(prefix.clone()));
            }
        };

        let completion = match step.completion() {
            Some(raw) => Some(NodeRef::parse(raw)?),
            None if node.kind == NodeKind::End => None,
            None => return Err(StepError::MissingCompletion),
        };

        let is_start = node.kind == NodeKind::Start;
        let shape = StepShape {
            node: &node,
            label,
            name: &step.name,
            description: &step.description,
            is_start,
            completion: completion.as_ref(),
        };
        tracing::debug!(
            "Planning step '{}' with {} command(s)",
            key,
            step.commands.len()
        );

        let mut plan = StepPlan {
            start: is_start.then(|| node.id.clone()),
            ..Default::default()
        };

        if step.commands.is_empty() {
            plan.actions.push(self.passthrough_action(key, &shape));
            plan.branches.extend(shape.completion_branch(ids));
            return Ok(plan);
        }

        let resolution = resolver::resolve(
            &step.targets,
            &self.playbook.target_definitions,
            &self.playbook.authentication_info_definitions,
        );
        plan.issues
            .extend(resolution.issues.iter().cloned().map(Issue::from));

        let (actions, branches) = self
            .expander
            .expand(&shape, &step.commands, &resolution, ids);
        plan.actions = actions;
        plan.branches = branches;
        Ok(plan)
    }

    /// A step without commands still becomes one node that echoes its key.
    fn passthrough_action(&self, key: &str, shape: &StepShape<'_>) -> Action {
        let label = if shape.label.is_empty() {
            shape.node.id.clone()
        } else {
            shape.label.to_string()
        };
        Action {
            id: shape.node.id.clone(),
            label,
            description: shape.description.to_string(),
            app_name: self.options.tools_app.name.clone(),
            app_version: self.options.tools_app.version.clone(),
            name: "repeat_back_to_me".to_string(),
            parameters: vec![Parameter::required("call", key)],
            is_start_node: shape.is_start,
        }
    }
}
