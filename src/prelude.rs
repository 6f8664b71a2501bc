//! Prelude module for convenient imports
//!
//! Re-exports the types needed to load, translate and write documents.
//!
//! # Example
//!
//! ```rust,no_run
//! use cacao_shuffle::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let playbook = Playbook::from_file("path/to/playbook.json")?;
//! let workflow = translate(&playbook);
//! workflow.save("path/to/shuffle.json")?;
//! # Ok(())
//! # }
//! ```

// Translation
pub use crate::translator::{
    Diagnostic, Diagnostics, IdAllocator, Issue, RandomIds, SequentialIds, Severity, Translation,
    Translator, TranslatorBuilder, TranslatorOptions, translate,
};

// Source and destination documents
pub use crate::playbook::{
    Address, AuthenticationInfo, Command, NodeKind, NodeRef, Playbook, Step, Target,
};
pub use crate::workflow::{Action, Branch, Parameter, Workflow, WorkflowSummary};

// Error types
pub use crate::error::{ExportError, GraphIssue, ParseError, StepError, TargetIssue};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
