use crate::error::StepError;
use std::fmt;

const SEPARATOR: &str = "--";

/// The kind prefix of a step reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Start,
    End,
    Action,
    Other(String),
}

impl NodeKind {
    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "start" => NodeKind::Start,
            "end" => NodeKind::End,
            "action" => NodeKind::Action,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Action => "action",
            NodeKind::Other(prefix) => prefix,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed `<kind>--<id>` reference, as used for step keys and `on_completion`.
///
/// Parsing splits on the first separator only, so an id that itself contains
/// `--` is kept whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub kind: NodeKind,
    pub id: String,
}

impl NodeRef {
    pub fn parse(raw: &str) -> Result<Self, StepError> {
        match raw.split_once(SEPARATOR) {
            Some((kind, id)) if !kind.is_empty() && !id.is_empty() => Ok(Self {
                kind: NodeKind::from_prefix(kind),
                id: id.to_string(),
            }),
            _ => Err(StepError::MalformedReference(raw.to_string())),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, SEPARATOR, self.id)
    }
}

/// Strips a `<kind>--` prefix from an identifier, returning it unchanged when
/// there is none.
pub fn canonical_id(raw: &str) -> &str {
    raw.split_once(SEPARATOR).map_or(raw, |(_, id)| id)
}
