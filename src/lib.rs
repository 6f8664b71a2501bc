//! # cacao-shuffle - CACAO Playbook to Shuffle Workflow Translation
//!
//! **cacao-shuffle** converts a CACAO security playbook, a JSON graph of
//! response steps, into a Shuffle workflow: a graph of executable actions and
//! the branches between them.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Decode the playbook with `Playbook::from_file` (or
//!     `from_json_str` / `from_slice`). Malformed JSON fails with a `ParseError`.
//! 2.  **Translate**: Build a `Translator` and call `translate`. Each step is
//!     classified by its `start--` / `action--` / `end--` key, its first target
//!     is resolved into an endpoint and credential requirement, and its commands
//!     are expanded into a chain of actions. Steps that cannot be translated are
//!     skipped and recorded as diagnostics; the call itself never fails.
//! 3.  **Write**: Save the resulting `Workflow` with `Workflow::save`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cacao_shuffle::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let playbook = Playbook::from_file("playbook.json")?;
//!
//!     let mut translator = Translator::builder()
//!         .with_type_mapping("curl", "http")
//!         .build();
//!     let translation = translator.translate_with_report(&playbook);
//!
//!     for diagnostic in translation.diagnostics.iter() {
//!         println!("skipped or degraded: {}", diagnostic);
//!     }
//!
//!     translation.workflow.save("shuffle.json")?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod playbook;
pub mod prelude;
pub mod translator;
pub mod workflow;

pub use translator::translate;
