//! Per-action results and the flattened output stream

use crate::message::Message;
use serde::Serialize;

/// Outcome of a mutation or of an action that could not be run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    pub success: bool,
    pub message: String,
}

impl StatusRecord {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// What one action produced
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// Normalized messages from a `read`, newest first
    Messages(Vec<Message>),
    /// A single status from any other action
    Status(StatusRecord),
}

impl ActionResult {
    /// The messages of a `read`; `None` for a status
    pub fn into_messages(self) -> Option<Vec<Message>> {
        match self {
            ActionResult::Messages(messages) => Some(messages),
            ActionResult::Status(_) => None,
        }
    }

    /// Append this result to the output stream: messages one by one, a
    /// status as a single record
    pub fn flatten_into(self, output: &mut Vec<OutputRecord>) {
        match self {
            ActionResult::Messages(messages) => {
                output.extend(messages.into_iter().map(OutputRecord::Message))
            }
            ActionResult::Status(status) => output.push(OutputRecord::Status(status)),
        }
    }
}

/// One line of output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputRecord {
    Message(Message),
    Status(StatusRecord),
}

impl OutputRecord {
    pub fn is_failure(&self) -> bool {
        matches!(self, OutputRecord::Status(status) if !status.success)
    }
}
