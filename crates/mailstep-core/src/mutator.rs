//! Move and state-update operations
//!
//! Both are non-fatal: every outcome, including transport errors, comes back
//! as a [`StatusRecord`].

use crate::mailbox::Mailbox;
use crate::result::StatusRecord;
use mailstep_graph::{GraphError, StatePatch};
use tracing::{info, warn};

/// Move a message to a folder (id or well-known name)
pub async fn move_message<M: Mailbox + ?Sized>(
    mailbox: &M,
    message_id: &str,
    destination: &str,
) -> StatusRecord {
    let status = match mailbox.move_message(message_id, destination).await {
        Ok(()) => StatusRecord::ok(format!("Email {} moved to {}", message_id, destination)),
        Err(GraphError::ApiError { status, body, .. }) => StatusRecord::failed(format!(
            "Failed to move email {}: Status {}: {}",
            message_id, status, body
        )),
        Err(e) => StatusRecord::failed(format!("Error moving email {}: {}", message_id, e)),
    };

    log_status(&status);
    status
}

/// Set the flag and/or read state of a message.
///
/// Only the fields that are `Some` are sent. Asking for neither is reported
/// as a failure and no request is made.
pub async fn update_state<M: Mailbox + ?Sized>(
    mailbox: &M,
    message_id: &str,
    flagged: Option<bool>,
    is_read: Option<bool>,
) -> StatusRecord {
    let patch = StatePatch::new(flagged, is_read);
    if patch.is_empty() {
        let status =
            StatusRecord::failed(format!("No state changes specified for email {}", message_id));
        log_status(&status);
        return status;
    }

    let status = match mailbox.update_message(message_id, &patch).await {
        Ok(()) => StatusRecord::ok(format!("Email {} state updated", message_id)),
        Err(GraphError::ApiError { status, body, .. }) => StatusRecord::failed(format!(
            "Failed to update email {}: Status {}: {}",
            message_id, status, body
        )),
        Err(e) => StatusRecord::failed(format!("Error updating email {}: {}", message_id, e)),
    };

    log_status(&status);
    status
}

fn log_status(status: &StatusRecord) {
    if status.success {
        info!("{}", status.message);
    } else {
        warn!("{}", status.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeMailbox, Reply};

    #[tokio::test]
    async fn test_move_success_message() {
        let mailbox = FakeMailbox::with_messages(0);
        let status = move_message(&mailbox, "AAMk123", "Archive").await;

        assert_eq!(status, StatusRecord::ok("Email AAMk123 moved to Archive"));
        assert_eq!(
            mailbox.calls(),
            vec![Call::Move {
                message_id: "AAMk123".to_string(),
                destination: "Archive".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_move_rejected_embeds_status_and_body() {
        let mailbox = FakeMailbox::with_messages(0).replying(Reply::Status(404));
        let status = move_message(&mailbox, "AAMk123", "Archive").await;

        assert!(!status.success);
        assert_eq!(
            status.message,
            r#"Failed to move email AAMk123: Status 404: {"error":{"code":"ErrorItemNotFound"}}"#
        );
    }

    #[tokio::test]
    async fn test_move_transport_error_is_reported() {
        let mailbox = FakeMailbox::with_messages(0).replying(Reply::Transport);
        let status = move_message(&mailbox, "AAMk123", "Archive").await;

        assert!(!status.success);
        assert!(status.message.starts_with("Error moving email AAMk123: "));
        assert!(status.message.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_update_state_noop_makes_no_request() {
        let mailbox = FakeMailbox::with_messages(0);
        let status = update_state(&mailbox, "AAMk123", None, None).await;

        assert_eq!(
            status,
            StatusRecord::failed("No state changes specified for email AAMk123")
        );
        assert!(mailbox.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_state_sends_single_patch() {
        let mailbox = FakeMailbox::with_messages(0);
        let status = update_state(&mailbox, "AAMk123", Some(true), None).await;

        assert_eq!(status, StatusRecord::ok("Email AAMk123 state updated"));
        assert_eq!(
            mailbox.calls(),
            vec![Call::Update {
                message_id: "AAMk123".to_string(),
                patch: StatePatch::new(Some(true), None),
            }]
        );
    }

    #[tokio::test]
    async fn test_update_state_failures() {
        let mailbox = FakeMailbox::with_messages(0).replying(Reply::Status(400));
        let status = update_state(&mailbox, "AAMk123", None, Some(false)).await;
        assert!(status
            .message
            .starts_with("Failed to update email AAMk123: Status 400: "));

        let mailbox = FakeMailbox::with_messages(0).replying(Reply::Transport);
        let status = update_state(&mailbox, "AAMk123", None, Some(false)).await;
        assert!(status.message.starts_with("Error updating email AAMk123: "));
    }
}
