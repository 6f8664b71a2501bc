use super::definition::Playbook;
use crate::error::ParseError;
use std::fs;
use std::path::Path;

impl Playbook {
    /// Decodes a playbook from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a playbook from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Reads and decodes a playbook file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let playbook = Self::from_slice(&bytes)?;
        tracing::debug!(
            "Loaded playbook '{}' with {} steps from '{}'",
            playbook.id,
            playbook.workflow.len(),
            path.display()
        );
        Ok(playbook)
    }
}
