use super::TranslatorOptions;
use super::ids::IdAllocator;
use super::parsing::{CommandContext, CommandParser, ParsedCommand};
use super::resolver::Resolution;
use crate::playbook::{Command, NodeRef};
use crate::workflow::{Action, Branch};
use ahash::AHashMap;

/// The translated identity of a step, shared by every action it expands into.
pub(super) struct StepShape<'a> {
    pub node: &'a NodeRef,
    pub label: &'a str,
    /// The step's own name; numbered labels of a multi-command step use it.
    pub name: &'a str,
    pub description: &'a str,
    pub is_start: bool,
    pub completion: Option<&'a NodeRef>,
}

impl StepShape<'_> {
    /// The single step-to-step edge used when the step maps to one action.
    pub fn completion_branch(&self, ids: &mut dyn IdAllocator) -> Option<Branch> {
        self.completion.map(|destination| Branch {
            id: ids.next_id(),
            source_id: self.node.id.clone(),
            destination_id: destination.id.clone(),
            label: format!("From {}", self.node.kind),
        })
    }
}

/// Expands a step's commands into one action per command, chained in order.
pub(super) struct CommandExpander<'a> {
    registry: &'a AHashMap<String, Box<dyn CommandParser>>,
    options: &'a TranslatorOptions,
}

impl<'a> CommandExpander<'a> {
    pub fn new(
        registry: &'a AHashMap<String, Box<dyn CommandParser>>,
        options: &'a TranslatorOptions,
    ) -> Self {
        Self { registry, options }
    }

    /// Returns the actions for `commands` (at least one) and the branches
    /// linking them to each other and to the step's completion target.
    ///
    /// The first action always carries the step id so that edges from other
    /// steps stay valid; further actions get fresh ids.
    pub fn expand(
        &self,
        step: &StepShape<'_>,
        commands: &[Command],
        resolution: &Resolution,
        ids: &mut dyn IdAllocator,
    ) -> (Vec<Action>, Vec<Branch>) {
        let total = commands.len();
        let context = CommandContext {
            endpoint: resolution.endpoint.as_ref(),
            options: self.options,
        };

        let mut actions = Vec::with_capacity(total);
        for (index, command) in commands.iter().enumerate() {
            let id = if index == 0 {
                step.node.id.clone()
            } else {
                ids.next_id()
            };
            let label = if total == 1 {
                step.label.to_string()
            } else {
                let base = if step.name.is_empty() {
                    step.label
                } else {
                    step.name
                };
                format!("{}-{}", index + 1, base)
            };

            let parsed = self.parse_command(command, &context);
            let mut parameters = parsed.parameters;
            if let Some(auth) = resolution.auth {
                parameters.extend(auth.parameters());
            }

            actions.push(Action {
                id,
                label,
                description: step.description.to_string(),
                app_name: parsed.app_name,
                app_version: parsed.app_version,
                name: parsed.operation,
                parameters,
                is_start_node: step.is_start && index == 0,
            });
        }

        let branches = if total == 1 {
            step.completion_branch(ids).into_iter().collect()
        } else {
            chain(&actions, step.completion, ids)
        };
        (actions, branches)
    }

    fn parse_command(&self, command: &Command, context: &CommandContext<'_>) -> ParsedCommand {
        match self.registry.get(&command.command_type) {
            Some(parser) => parser.parse(command, context),
            None => {
                tracing::debug!(
                    "No parser for command type '{}'; emitting a bare action",
                    command.command_type
                );
                ParsedCommand {
                    app_name: self.options.tools_app.name.clone(),
                    app_version: self.options.tools_app.version.clone(),
                    operation: String::new(),
                    parameters: Vec::new(),
                }
            }
        }
    }
}

/// Links action i to i+1, then the last action to the completion target.
fn chain(
    actions: &[Action],
    completion: Option<&NodeRef>,
    ids: &mut dyn IdAllocator,
) -> Vec<Branch> {
    let mut branches: Vec<Branch> = actions
        .windows(2)
        .enumerate()
        .map(|(i, pair)| Branch {
            id: ids.next_id(),
            source_id: pair[0].id.clone(),
            destination_id: pair[1].id.clone(),
            label: format!("command {} to {}", i + 1, i + 2),
        })
        .collect();

    if let (Some(last), Some(destination)) = (actions.last(), completion) {
        branches.push(Branch {
            id: ids.next_id(),
            source_id: last.id.clone(),
            destination_id: destination.id.clone(),
            label: format!("command {} to {}", actions.len(), destination.kind),
        });
    }
    branches
}
