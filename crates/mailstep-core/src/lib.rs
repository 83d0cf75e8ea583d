//! Core business logic for mailstep
//!
//! Turns a list of mailbox actions into one flat output stream: reads are
//! fetched and normalized, moves and state updates produce status records,
//! and everything is aggregated in action order.

mod action;
mod dispatch;
mod error;
mod mailbox;
mod message;
mod mutator;
mod result;
mod runner;

pub use action::{Action, ReadRequest, DEFAULT_FOLDER, DEFAULT_TOP};
pub use dispatch::Dispatcher;
pub use error::{CoreError, CoreResult};
pub use mailbox::{connect, Mailbox};
pub use message::{normalize, Message, MessageBody, Recipient};
pub use mutator::{move_message, update_state};
pub use result::{ActionResult, OutputRecord, StatusRecord};
pub use runner::{BatchOutput, BatchRunner, BatchSummary};

#[cfg(test)]
mod testing;
