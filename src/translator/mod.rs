use crate::error::GraphIssue;
use crate::playbook::{Playbook, canonical_id};
use crate::workflow::Workflow;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

pub mod diagnostics;
mod expander;
pub mod ids;
pub mod parsing;
mod planner;
pub mod resolver;

pub use diagnostics::{Diagnostic, Diagnostics, Issue, Severity};
pub use ids::{IdAllocator, RandomIds, SequentialIds};
use parsing::*;
use planner::StepPlanner;

/// An app reference in the destination workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRef {
    pub name: String,
    pub version: String,
}

impl AppRef {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }
}

/// Settings that shape the emitted actions.
#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    /// App used for translated HTTP commands.
    pub http_app: AppRef,
    /// App used for pass-through and untyped actions.
    pub tools_app: AppRef,
    pub http_timeout: String,
    pub verify_tls: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            http_app: AppRef::new("http", "1.4.0"),
            tools_app: AppRef::new("Shuffle Tools", "1.2.0"),
            http_timeout: "10".to_string(),
            verify_tls: false,
        }
    }
}

/// The result of a translation call: the workflow plus everything that was
/// skipped or degraded on the way.
#[derive(Debug, Clone)]
pub struct Translation {
    pub workflow: Workflow,
    pub diagnostics: Diagnostics,
}

/// Translates CACAO playbooks into Shuffle workflows.
pub struct Translator {
    registry: AHashMap<String, Box<dyn CommandParser>>,
    options: TranslatorOptions,
    ids: Box<dyn IdAllocator>,
}

pub struct TranslatorBuilder {
    registry: AHashMap<String, Box<dyn CommandParser>>,
    options: TranslatorOptions,
    ids: Option<Box<dyn IdAllocator>>,
}

impl TranslatorBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, Box<dyn CommandParser>> = AHashMap::new();
        register_default_parsers(&mut registry);
        Self {
            registry,
            options: TranslatorOptions::default(),
            ids: None,
        }
    }

    /// Uses `ids` for synthetic action and branch identifiers.
    pub fn with_ids(mut self, ids: impl IdAllocator + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Shorthand for reproducible random identifiers.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_ids(RandomIds::seeded(seed))
    }

    /// Handles commands of `user_type` with the built-in parser for `builtin_type`.
    pub fn with_type_mapping(mut self, user_type: &str, builtin_type: &str) -> Self {
        if let Some(parser) = create_parser_by_name(builtin_type) {
            self.registry.insert(user_type.to_string(), parser);
        } else {
            tracing::warn!("Unknown built-in command type '{}'", builtin_type);
        }
        self
    }

    pub fn with_custom_parser(mut self, parser: Box<dyn CommandParser>) -> Self {
        self.registry
            .insert(parser.command_type().to_string(), parser);
        self
    }

    pub fn with_http_app(mut self, name: &str, version: &str) -> Self {
        self.options.http_app = AppRef::new(name, version);
        self
    }

    pub fn with_tools_app(mut self, name: &str, version: &str) -> Self {
        self.options.tools_app = AppRef::new(name, version);
        self
    }

    pub fn with_http_defaults(mut self, timeout: &str, verify_tls: bool) -> Self {
        self.options.http_timeout = timeout.to_string();
        self.options.verify_tls = verify_tls;
        self
    }

    pub fn build(self) -> Translator {
        Translator {
            registry: self.registry,
            options: self.options,
            ids: self
                .ids
                .unwrap_or_else(|| Box::new(RandomIds::from_os_rng())),
        }
    }
}

impl Default for TranslatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::new()
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// Translates a playbook, logging anything that had to be skipped.
    pub fn translate(&mut self, playbook: &Playbook) -> Workflow {
        self.translate_with_report(playbook).workflow
    }

    /// Translates a playbook and returns the recorded diagnostics alongside.
    ///
    /// Each step is first planned on its own; the plans are then merged into
    /// one graph. Steps are visited in key order so that output is stable.
    pub fn translate_with_report(&mut self, playbook: &Playbook) -> Translation {
        let mut workflow = Workflow {
            id: canonical_id(&playbook.id).to_string(),
            name: playbook.name.clone(),
            description: playbook.description.clone(),
            created: playbook.created.map_or(0, |t| t.timestamp()),
            edited: playbook.modified.map_or(0, |t| t.timestamp()),
            updated_by: playbook.created_by.clone(),
            workflow_type: format!("CACAO {}", playbook.playbook_type),
            ..Default::default()
        };
        let mut diagnostics = Diagnostics::default();

        tracing::debug!(
            "Translating playbook '{}': {} steps, {} targets, {} variables",
            playbook.id,
            playbook.workflow.len(),
            playbook.target_definitions.len(),
            playbook.playbook_variables.len()
        );

        // Step key that emitted each branch, parallel to `workflow.branches`.
        let mut branch_origins: Vec<&str> = Vec::new();
        let planner = StepPlanner::new(playbook, &self.registry, &self.options);
        for (key, step) in playbook.workflow.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            let mut plan = match planner.plan(key, step, &mut *self.ids) {
                Ok(plan) => plan,
                Err(err) => {
                    diagnostics.record(key, err);
                    continue;
                }
            };
            for issue in plan.issues.drain(..) {
                diagnostics.record(key, issue);
            }

            if let Some(start) = plan.start.take() {
                if workflow.start.is_empty() {
                    workflow.start = start;
                } else {
                    diagnostics.record(
                        key,
                        GraphIssue::DuplicateStart {
                            kept: workflow.start.clone(),
                            ignored: start,
                        },
                    );
                    for action in &mut plan.actions {
                        action.is_start_node = false;
                    }
                }
            }
            branch_origins.extend(std::iter::repeat_n(key.as_str(), plan.branches.len()));
            workflow.actions.append(&mut plan.actions);
            workflow.branches.append(&mut plan.branches);
        }

        if workflow.start.is_empty() {
            tracing::debug!("No start step translated; workflow has no start node");
        }

        let known: AHashSet<&str> = workflow.actions.iter().map(|a| a.id.as_str()).collect();
        for (branch, origin) in workflow.branches.iter().zip(&branch_origins) {
            if !known.contains(branch.destination_id.as_str()) {
                diagnostics.record(
                    origin,
                    GraphIssue::DanglingBranch {
                        branch_id: branch.id.clone(),
                        destination_id: branch.destination_id.clone(),
                    },
                );
            }
        }

        tracing::info!(
            "Translated playbook '{}' into {} actions and {} branches ({} diagnostics)",
            playbook.id,
            workflow.actions.len(),
            workflow.branches.len(),
            diagnostics.len()
        );
        Translation {
            workflow,
            diagnostics,
        }
    }
}

/// Translates a playbook with default settings and random identifiers.
pub fn translate(playbook: &Playbook) -> Workflow {
    Translator::builder().build().translate(playbook)
}
