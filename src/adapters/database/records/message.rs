use crate::domain::message::{Message, MessageDraft, MessageId};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Document layout of a message in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ObjectId>,
    pub(crate) recipient: String,
    pub(crate) sender: String,
    pub(crate) content: String,
    pub(crate) timestamp: bson::DateTime,
}

impl MessageRecord {
    /// A record without `_id`, so the store generates one on insert.
    pub(crate) fn from_draft(draft: MessageDraft, timestamp: OffsetDateTime) -> Self {
        Self {
            id: None,
            recipient: draft.recipient,
            sender: draft.sender,
            content: draft.content,
            timestamp: bson::DateTime::from_time_0_3(timestamp),
        }
    }

    /// Converts a stored document, dropping any that lack an `_id`.
    pub(crate) fn into_message(self) -> Option<Message> {
        let Some(id) = self.id else {
            tracing::warn!(sender = %self.sender, recipient = %self.recipient, "Skipping stored message without _id");
            return None;
        };
        Some(Message {
            id: MessageId::from(id),
            recipient: self.recipient,
            sender: self.sender,
            content: self.content,
            timestamp: self.timestamp.to_time_0_3(),
        })
    }
}

impl From<&Message> for MessageRecord {
    fn from(message: &Message) -> Self {
        Self {
            id: Some(message.id.as_object_id()),
            recipient: message.recipient.clone(),
            sender: message.sender.clone(),
            content: message.content.clone(),
            timestamp: bson::DateTime::from_time_0_3(message.timestamp),
        }
    }
}
