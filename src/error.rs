use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a call because the input document could not be decoded.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to decode JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when writing a translated workflow.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode workflow: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not write file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Conditions that cause a single step to be skipped. Translation of the
/// remaining steps continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("Reference '{0}' is not of the form '<kind>--<id>'")]
    MalformedReference(String),

    #[error("Step kind '{0}' is not supported")]
    UnsupportedStepKind(String),

    #[error("Step has no on_completion and is not an end step")]
    MissingCompletion,
}

/// Conditions that degrade a step's target or credential enrichment without
/// skipping the step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetIssue {
    #[error("Target '{0}' is not present in target_definitions")]
    UnknownTarget(String),

    #[error("Only one target per step is supported; ignoring {ignored:?}")]
    ExtraTargetsIgnored { ignored: Vec<String> },

    #[error("Target '{0}' declares no address")]
    TargetWithoutAddress(String),

    #[error("Target '{target}' has {count} {family} addresses; only the first is used")]
    ExtraAddressesIgnored {
        target: String,
        family: &'static str,
        count: usize,
    },

    #[error("Authentication '{0}' is not present in authentication_info_definitions")]
    UnknownAuthentication(String),

    #[error("Authentication type '{0}' is not supported")]
    UnsupportedAuthentication(String),
}

/// Conditions found while merging step plans into the final graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    #[error("Branch '{branch_id}' points at '{destination_id}', which has no action")]
    DanglingBranch {
        branch_id: String,
        destination_id: String,
    },

    #[error("Workflow already starts at '{kept}'; ignoring additional start '{ignored}'")]
    DuplicateStart { kept: String, ignored: String },
}
