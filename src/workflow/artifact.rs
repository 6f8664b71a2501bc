use super::definition::Workflow;
use crate::error::{ExportError, ParseError};
use std::fs;
use std::path::Path;

impl Workflow {
    /// Encodes the workflow as JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Saves the workflow to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Wrote workflow '{}' to '{}'", self.id, path.display());
        Ok(())
    }

    /// Loads a previously saved workflow.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
