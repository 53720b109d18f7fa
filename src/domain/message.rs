use crate::error::{AppError, Result};
use bson::oid::ObjectId;
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Store-assigned identifier of a message, rendered as 24 hexadecimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(ObjectId);

impl MessageId {
    /// Validates a client-supplied identifier.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` unless `raw` is exactly 24 hexadecimal digits.
    pub fn parse(raw: &str) -> Result<Self> {
        ObjectId::parse_str(raw).map(Self).map_err(|_| AppError::BadRequest("Invalid message ID".to_string()))
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    #[must_use]
    pub const fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for MessageId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for MessageId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Client-supplied message fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub recipient: String,
    pub sender: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub recipient: String,
    pub sender: String,
    pub content: String,
    pub timestamp: OffsetDateTime,
}

impl Message {
    #[must_use]
    pub fn from_draft(id: MessageId, draft: MessageDraft, timestamp: OffsetDateTime) -> Self {
        Self { id, recipient: draft.recipient, sender: draft.sender, content: draft.content, timestamp }
    }
}

/// Current time truncated to the store's millisecond resolution.
#[must_use]
pub fn now() -> OffsetDateTime {
    bson::DateTime::now().to_time_0_3()
}
