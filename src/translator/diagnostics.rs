use crate::error::{GraphIssue, StepError, TargetIssue};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The output is degraded but complete for this subject.
    Warning,
    /// The subject was skipped.
    Error,
}

/// Any non-fatal condition recorded during translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Target(#[from] TargetIssue),
    #[error(transparent)]
    Graph(#[from] GraphIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::Step(_) => Severity::Error,
            Issue::Target(_) | Issue::Graph(_) => Severity::Warning,
        }
    }
}

/// A recorded issue together with the step key or id it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub subject: String,
    pub issue: Issue,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.issue.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.issue)
    }
}

/// The diagnostics of one translation call. Every entry is also emitted as a
/// `tracing` event when recorded.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn record(&mut self, subject: &str, issue: impl Into<Issue>) {
        let issue = issue.into();
        match issue.severity() {
            Severity::Error => tracing::error!(subject, "{}", issue),
            Severity::Warning => tracing::warn!(subject, "{}", issue),
        }
        self.entries.push(Diagnostic {
            subject: subject.to_string(),
            issue,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one step was skipped.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity() == Severity::Error)
    }

    /// Diagnostics concerning the given subject.
    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.subject == subject)
    }
}
