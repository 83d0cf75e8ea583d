//! In-memory mailbox for pipeline tests

use crate::mailbox::Mailbox;
use async_trait::async_trait;
use mailstep_graph::{GraphError, GraphResult, StatePatch};
use serde_json::{json, Value};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Fetch {
        folder: Option<String>,
        top: usize,
        filter: Option<String>,
    },
    Move {
        message_id: String,
        destination: String,
    },
    Update {
        message_id: String,
        patch: StatePatch,
    },
}

/// Outcome the fake returns for mutations
#[derive(Debug, Clone, Copy)]
pub(crate) enum Reply {
    Ok,
    Status(u16),
    Transport,
}

pub(crate) struct FakeMailbox {
    messages: Vec<Value>,
    fetch_status: Option<u16>,
    reply: Reply,
    calls: Mutex<Vec<Call>>,
}

impl FakeMailbox {
    /// A mailbox holding `count` messages, `m0` being the newest
    pub(crate) fn with_messages(count: usize) -> Self {
        Self {
            messages: (0..count)
                .map(|i| json!({ "id": format!("m{}", i), "subject": format!("Subject {}", i) }))
                .collect(),
            fetch_status: None,
            reply: Reply::Ok,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_fetch(mut self, status: u16) -> Self {
        self.fetch_status = Some(status);
        self
    }

    pub(crate) fn replying(mut self, reply: Reply) -> Self {
        self.reply = reply;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn reply(&self) -> GraphResult<()> {
        match self.reply {
            Reply::Ok => Ok(()),
            Reply::Status(status) => Err(GraphError::ApiError {
                status,
                headers: Vec::new(),
                body: r#"{"error":{"code":"ErrorItemNotFound"}}"#.to_string(),
                detail: None,
            }),
            Reply::Transport => Err(GraphError::ParseError("connection reset".to_string())),
        }
    }
}

#[async_trait]
impl Mailbox for FakeMailbox {
    async fn fetch_messages(
        &self,
        folder: Option<&str>,
        top: usize,
        filter: Option<&str>,
    ) -> GraphResult<Vec<Value>> {
        self.record(Call::Fetch {
            folder: folder.map(str::to_string),
            top,
            filter: filter.map(str::to_string),
        });

        if let Some(status) = self.fetch_status {
            return Err(GraphError::ApiError {
                status,
                headers: Vec::new(),
                body: String::new(),
                detail: None,
            });
        }
        Ok(self.messages.iter().take(top).cloned().collect())
    }

    async fn move_message(&self, message_id: &str, destination: &str) -> GraphResult<()> {
        self.record(Call::Move {
            message_id: message_id.to_string(),
            destination: destination.to_string(),
        });
        self.reply()
    }

    async fn update_message(&self, message_id: &str, patch: &StatePatch) -> GraphResult<()> {
        self.record(Call::Update {
            message_id: message_id.to_string(),
            patch: patch.clone(),
        });
        self.reply()
    }
}
