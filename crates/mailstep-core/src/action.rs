//! Action records
//!
//! Actions arrive as loosely-typed JSON objects. Parsing never fails: fields
//! of the wrong type are treated as absent, and anything without a known
//! `action` tag becomes [`Action::Unknown`].

use serde_json::Value;

/// Folder read when none is given
pub const DEFAULT_FOLDER: &str = "inbox";

/// Message quota for a read when none is given
pub const DEFAULT_TOP: usize = 100;

/// Parameters of a `read` action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    /// Folder id or well-known name
    pub folder: String,
    /// Maximum number of messages to return
    pub top: usize,
    /// OData filter expression, passed through verbatim
    pub filter: Option<String>,
}

impl Default for ReadRequest {
    fn default() -> Self {
        Self {
            folder: DEFAULT_FOLDER.to_string(),
            top: DEFAULT_TOP,
            filter: None,
        }
    }
}

/// One unit of work requested by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Read(ReadRequest),
    Move {
        mail: Option<String>,
        folder: Option<String>,
    },
    State {
        mail: Option<String>,
        flagged: Option<bool>,
        is_read: Option<bool>,
    },
    Unknown {
        tag: Option<String>,
    },
}

impl Action {
    /// Interpret one input record
    pub fn from_value(value: &Value) -> Self {
        let tag = value.get("action").and_then(Value::as_str);

        match tag {
            Some("read") => Action::Read(ReadRequest {
                folder: string_field(value, "folder")
                    .unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
                top: value
                    .get("top")
                    .and_then(Value::as_u64)
                    .map(|top| top as usize)
                    .unwrap_or(DEFAULT_TOP),
                filter: non_empty(value, "filter"),
            }),
            Some("move") => Action::Move {
                mail: non_empty(value, "mail"),
                folder: non_empty(value, "folder"),
            },
            Some("state") => Action::State {
                mail: non_empty(value, "mail"),
                flagged: value.get("flagged").and_then(Value::as_bool),
                is_read: value.get("isRead").and_then(Value::as_bool),
            },
            other => Action::Unknown {
                tag: other.map(str::to_string),
            },
        }
    }

    /// The tag as it should appear in logs and messages
    pub fn tag(&self) -> &str {
        match self {
            Action::Read(_) => "read",
            Action::Move { .. } => "move",
            Action::State { .. } => "state",
            Action::Unknown { tag } => tag.as_deref().unwrap_or("null"),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_empty(value: &Value, key: &str) -> Option<String> {
    string_field(value, key).filter(|s| !s.is_empty())
}
