//! Normalized message shape
//!
//! Graph returns deeply nested records where any field may be missing
//! (`from.emailAddress.name`, `body.content`, ...). [`normalize`] flattens
//! them into a fixed key set so downstream consumers never see provider
//! nesting or missing keys.

use serde::Serialize;
use serde_json::Value;

/// A sender or recipient
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl Recipient {
    /// Read a Graph `{ "emailAddress": { "name", "address" } }` wrapper
    fn from_wrapper(raw: Option<&Value>) -> Self {
        let email = raw.and_then(|r| r.get("emailAddress"));
        Self {
            name: text(email, "name"),
            address: text(email, "address"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub content_type: Option<String>,
    pub content: Option<String>,
}

/// Provider-independent message record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub from: Recipient,
    pub to: Vec<Recipient>,
    pub cc: Vec<Recipient>,
    pub received_date_time: Option<String>,
    pub sent_date_time: Option<String>,
    pub has_attachments: bool,
    pub importance: Option<String>,
    pub is_read: bool,
    pub is_draft: bool,
    pub body_preview: Option<String>,
    pub body: MessageBody,
    pub conversation_id: Option<String>,
    pub internet_message_id: Option<String>,
    pub web_link: Option<String>,
}

/// Convert a raw Graph message into a [`Message`]. Total: never fails.
pub fn normalize(raw: &Value) -> Message {
    let raw = Some(raw);
    let body = raw.and_then(|r| r.get("body"));

    Message {
        id: text(raw, "id"),
        subject: text(raw, "subject"),
        from: Recipient::from_wrapper(raw.and_then(|r| r.get("from"))),
        to: recipients(raw, "toRecipients"),
        cc: recipients(raw, "ccRecipients"),
        received_date_time: text(raw, "receivedDateTime"),
        sent_date_time: text(raw, "sentDateTime"),
        has_attachments: flag(raw, "hasAttachments"),
        importance: text(raw, "importance"),
        is_read: flag(raw, "isRead"),
        is_draft: flag(raw, "isDraft"),
        body_preview: text(raw, "bodyPreview"),
        body: MessageBody {
            content_type: text(body, "contentType"),
            content: text(body, "content"),
        },
        conversation_id: text(raw, "conversationId"),
        internet_message_id: text(raw, "internetMessageId"),
        web_link: text(raw, "webLink"),
    }
}

fn text(obj: Option<&Value>, key: &str) -> Option<String> {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn flag(obj: Option<&Value>, key: &str) -> bool {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn recipients(obj: Option<&Value>, key: &str) -> Vec<Recipient> {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_array)
        .map(|list| list.iter().map(|r| Recipient::from_wrapper(Some(r))).collect())
        .unwrap_or_default()
}
