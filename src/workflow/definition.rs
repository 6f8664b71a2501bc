use serde::{Deserialize, Serialize};

/// A Shuffle workflow: the translated action graph.
///
/// Fields serialize in declaration order, which keeps written files stable
/// for diffing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start: String,
    pub actions: Vec<Action>,
    pub branches: Vec<Branch>,
    pub created: i64,
    pub edited: i64,
    pub updated_by: String,
    pub workflow_type: String,
}

impl Workflow {
    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Branches leaving the action with the given id.
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Branch> + 'a {
        self.branches.iter().filter(move |b| b.source_id == id)
    }
}

/// A single executable node of the workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub label: String,
    pub description: String,
    pub app_name: String,
    pub app_version: String,
    /// The app operation to run, e.g. `"POST"` for the http app.
    pub name: String,
    pub parameters: Vec<Parameter>,
    #[serde(rename = "isStartNode")]
    pub is_start_node: bool,
}

impl Action {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A directed edge between two actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub source_id: String,
    pub destination_id: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub required: bool,
    /// Marks a value the user must fill in after import.
    pub configuration: bool,
    pub multiline: bool,
}

impl Parameter {
    pub fn required(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            required: true,
            ..Default::default()
        }
    }

    pub fn optional(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// A required, blank value left for manual configuration.
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            configuration: true,
            ..Default::default()
        }
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }
}
