//! Batch runner
//!
//! Runs actions strictly in order, one fully resolved before the next, and
//! flattens their results into a single output sequence.

use crate::action::{Action, ReadRequest};
use crate::dispatch::Dispatcher;
use crate::mailbox::Mailbox;
use crate::message::Message;
use crate::result::OutputRecord;
use crate::CoreResult;
use tracing::info;

/// Counts reported at the end of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub actions: usize,
    pub records: usize,
    pub failures: usize,
}

#[derive(Debug)]
pub struct BatchOutput {
    pub records: Vec<OutputRecord>,
    pub summary: BatchSummary,
}

pub struct BatchRunner<M> {
    dispatcher: Dispatcher<M>,
}

impl<M: Mailbox> BatchRunner<M> {
    pub fn new(mailbox: M) -> Self {
        Self {
            dispatcher: Dispatcher::new(mailbox),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<M> {
        &self.dispatcher
    }

    /// Run every action in order and collect the flattened output
    pub async fn run(&self, actions: &[Action]) -> CoreResult<BatchOutput> {
        info!("Processing {} actions", actions.len());

        let mut records = Vec::new();
        for (i, action) in actions.iter().enumerate() {
            info!("Action {}/{}: {}", i + 1, actions.len(), action.tag());
            self.dispatcher
                .dispatch(action)
                .await?
                .flatten_into(&mut records);
        }

        let summary = BatchSummary {
            actions: actions.len(),
            records: records.len(),
            failures: records.iter().filter(|r| r.is_failure()).count(),
        };
        info!(
            "Done. Processed {} actions, wrote {} results ({} failed)",
            summary.actions, summary.records, summary.failures
        );

        Ok(BatchOutput { records, summary })
    }

    /// Single read driven by top-level configuration, output unwrapped
    pub async fn run_legacy(&self, request: &ReadRequest) -> CoreResult<Vec<Message>> {
        let action = Action::Read(request.clone());
        let messages = self
            .dispatcher
            .dispatch(&action)
            .await?
            .into_messages()
            .unwrap_or_default();
        info!("Done. Exported {} emails", messages.len());
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeMailbox, Reply};
    use crate::{CoreError, StatusRecord};
    use serde_json::json;

    fn actions(values: &[serde_json::Value]) -> Vec<Action> {
        values.iter().map(Action::from_value).collect()
    }

    #[tokio::test]
    async fn test_read_then_move_keeps_order() {
        let runner = BatchRunner::new(FakeMailbox::with_messages(5));
        let output = runner
            .run(&actions(&[
                json!({ "action": "read", "folder": "inbox", "top": 2 }),
                json!({ "action": "move", "mail": "AAMk123", "folder": "Archive" }),
            ]))
            .await
            .unwrap();

        assert_eq!(output.records.len(), 3);
        let value = serde_json::to_value(&output.records).unwrap();
        assert_eq!(value[0]["id"], "m0");
        assert_eq!(value[1]["id"], "m1");
        assert_eq!(
            value[2],
            json!({ "success": true, "message": "Email AAMk123 moved to Archive" })
        );
        assert_eq!(
            output.summary,
            BatchSummary {
                actions: 2,
                records: 3,
                failures: 0
            }
        );
    }

    #[tokio::test]
    async fn test_failures_are_in_band() {
        let runner = BatchRunner::new(FakeMailbox::with_messages(1).replying(Reply::Status(404)));
        let output = runner
            .run(&actions(&[
                json!({ "action": "archive" }),
                json!({ "action": "state", "mail": "AAMk123" }),
                json!({ "action": "move", "mail": "AAMk123", "folder": "Archive" }),
                json!({ "action": "read", "top": 1 }),
            ]))
            .await
            .unwrap();

        assert_eq!(
            output.records[0],
            OutputRecord::Status(StatusRecord::failed("Unknown action type: archive"))
        );
        assert_eq!(
            output.records[1],
            OutputRecord::Status(StatusRecord::failed(
                "No state changes specified for email AAMk123"
            ))
        );
        assert!(output.records[2].is_failure());
        assert!(matches!(output.records[3], OutputRecord::Message(_)));
        assert_eq!(output.summary.failures, 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_batch() {
        let runner = BatchRunner::new(FakeMailbox::with_messages(1).failing_fetch(500));
        let err = runner
            .run(&actions(&[
                json!({ "action": "read" }),
                json!({ "action": "move", "mail": "AAMk123", "folder": "Archive" }),
            ]))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::FetchError(_)));
        // The move after the failed read never runs
        assert_eq!(runner.dispatcher().mailbox().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_legacy_read_failure_is_fatal() {
        let runner = BatchRunner::new(FakeMailbox::with_messages(2).failing_fetch(403));
        let request = ReadRequest {
            folder: "Archive".to_string(),
            top: 2,
            filter: None,
        };
        let err = runner.run_legacy(&request).await.unwrap_err();

        assert!(matches!(err, CoreError::FetchError(_)));
        assert_eq!(
            runner.dispatcher().mailbox().calls(),
            vec![Call::Fetch {
                folder: Some("Archive".to_string()),
                top: 2,
                filter: None
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let runner = BatchRunner::new(FakeMailbox::with_messages(3));
        let output = runner.run(&[]).await.unwrap();
        assert!(output.records.is_empty());
        assert!(runner.dispatcher().mailbox().calls().is_empty());
    }

    #[tokio::test]
    async fn test_legacy_read() {
        let runner = BatchRunner::new(FakeMailbox::with_messages(4));
        let messages = runner.run_legacy(&ReadRequest::default()).await.unwrap();

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].id.as_deref(), Some("m0"));
        assert_eq!(
            runner.dispatcher().mailbox().calls(),
            vec![Call::Fetch {
                folder: Some("inbox".to_string()),
                top: 100,
                filter: None
            }]
        );
    }
}
