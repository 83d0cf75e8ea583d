//! Action dispatch
//!
//! One transition per action tag, no state kept between calls. The only
//! error that escapes is a failed fetch, which is fatal for the run; every
//! other outcome is an [`ActionResult`].

use crate::action::{Action, ReadRequest};
use crate::mailbox::Mailbox;
use crate::message::{normalize, Message};
use crate::mutator;
use crate::result::{ActionResult, StatusRecord};
use crate::CoreResult;
use tracing::info;

pub struct Dispatcher<M> {
    mailbox: M,
}

impl<M: Mailbox> Dispatcher<M> {
    pub fn new(mailbox: M) -> Self {
        Self { mailbox }
    }

    pub fn mailbox(&self) -> &M {
        &self.mailbox
    }

    pub async fn dispatch(&self, action: &Action) -> CoreResult<ActionResult> {
        let result = match action {
            Action::Read(request) => ActionResult::Messages(self.read(request).await?),

            Action::Move {
                mail: Some(mail),
                folder: Some(folder),
            } => {
                info!("Moving email {} to folder '{}'...", mail, folder);
                ActionResult::Status(mutator::move_message(&self.mailbox, mail, folder).await)
            }
            Action::Move { .. } => ActionResult::Status(StatusRecord::failed(
                r#"Move action requires both "mail" and "folder" fields"#,
            )),

            Action::State {
                mail: Some(mail),
                flagged,
                is_read,
            } => {
                info!("Updating state for email {}...", mail);
                ActionResult::Status(
                    mutator::update_state(&self.mailbox, mail, *flagged, *is_read).await,
                )
            }
            Action::State { mail: None, .. } => ActionResult::Status(StatusRecord::failed(
                r#"State action requires "mail" field"#,
            )),

            Action::Unknown { .. } => ActionResult::Status(StatusRecord::failed(format!(
                "Unknown action type: {}",
                action.tag()
            ))),
        };

        Ok(result)
    }

    /// Fetch and normalize one folder's worth of messages
    async fn read(&self, request: &ReadRequest) -> CoreResult<Vec<Message>> {
        info!("Reading emails from folder '{}'...", request.folder);
        if let Some(filter) = &request.filter {
            info!("Applying filter: {}", filter);
        }

        let raw = self
            .mailbox
            .fetch_messages(Some(request.folder.as_str()), request.top, request.filter.as_deref())
            .await?;
        let messages: Vec<Message> = raw.iter().map(normalize).collect();

        info!("Retrieved {} emails", messages.len());
        Ok(messages)
    }
}
