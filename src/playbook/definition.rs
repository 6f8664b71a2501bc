use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A complete CACAO security playbook as read from JSON.
///
/// Every field is optional on the wire; absent maps decode as empty so that a
/// sparse document still translates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Playbook {
    #[serde(rename = "type")]
    pub playbook_type: String,
    pub spec_version: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_by: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub revoked: bool,
    pub workflow_start: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub derived_from: Vec<String>,

    #[serde(deserialize_with = "null_as_empty")]
    pub workflow: AHashMap<String, Step>,
    #[serde(deserialize_with = "null_as_empty")]
    pub playbook_variables: AHashMap<String, Variable>,
    #[serde(deserialize_with = "null_as_empty")]
    pub agent_definitions: AHashMap<String, Agent>,
    #[serde(deserialize_with = "null_as_empty")]
    pub target_definitions: AHashMap<String, Target>,
    #[serde(deserialize_with = "null_as_empty")]
    pub authentication_info_definitions: AHashMap<String, AuthenticationInfo>,
}

/// One node of the playbook's `workflow` map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub step_type: String,
    pub on_completion: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub commands: Vec<Command>,
    pub agent: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub targets: Vec<String>,

    // Conditional steps are decoded but not translated.
    pub condition: Option<String>,
    pub on_true: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub in_args: Vec<String>,
}

impl Step {
    /// The completion reference, treating an empty string as absent.
    pub fn completion(&self) -> Option<&str> {
        self.on_completion.as_deref().filter(|s| !s.is_empty())
    }
}

/// A single command of a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Command {
    #[serde(rename = "type")]
    pub command_type: String,
    pub description: String,
    /// The raw command line, e.g. `"POST /api/x HTTP/1.1"`.
    pub command: String,
    pub content: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub headers: AHashMap<String, Vec<String>>,
}

/// An execution target referenced by name from a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    #[serde(rename = "type")]
    pub target_type: String,
    pub name: String,
    pub address: Address,
    pub port: Option<String>,
    pub authentication_info: Option<String>,
}

/// Address families of a target. Families are expected to be mutually
/// exclusive; when several are set the resolver picks by precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_empty")]
    pub domain: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub url: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub ipv4: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub ipv6: Vec<String>,
}

/// A credential requirement. Values are never carried over into the workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticationInfo {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub kms: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    #[serde(rename = "type")]
    pub agent_type: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Variable {
    #[serde(rename = "type")]
    pub variable_type: String,
    pub constant: bool,
    pub external: bool,
    pub value: serde_json::Value,
}

/// Decodes an explicit JSON `null` collection as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
