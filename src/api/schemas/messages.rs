use crate::domain::message::{Message, MessageDraft};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Body of a create or replace request. Unknown keys such as `id` or
/// `timestamp` are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    pub recipient: String,
    pub sender: String,
    pub content: String,
}

impl From<MessageRequest> for MessageDraft {
    fn from(req: MessageRequest) -> Self {
        Self { recipient: req.recipient, sender: req.sender, content: req.content }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub recipient: String,
    pub sender: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self { id: m.id.to_string(), recipient: m.recipient, sender: m.sender, content: m.content, timestamp: m.timestamp }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageResponse {
    pub message: String,
    pub updated_message: MessageResponse,
}

impl From<Message> for UpdateMessageResponse {
    fn from(m: Message) -> Self {
        Self { message: "Message updated successfully".to_string(), updated_message: m.into() }
    }
}
