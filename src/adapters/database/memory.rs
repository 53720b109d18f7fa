use crate::adapters::database::MessageStore;
use crate::domain::message::{Message, MessageDraft, MessageId};
use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use time::OffsetDateTime;

/// Process-local store for development and tests. Identifiers are generated here
/// the same way the document store generates them.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    documents: DashMap<MessageId, Message>,
}

impl InMemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = self.documents.iter().map(|entry| entry.value().clone()).collect();
        // Generated ids increase over time, so this is insertion order.
        messages.sort_by_key(|m| m.id);
        Ok(messages)
    }

    async fn find_one(&self, id: MessageId) -> Result<Option<Message>> {
        Ok(self.documents.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert_one(&self, draft: MessageDraft, timestamp: OffsetDateTime) -> Result<MessageId> {
        let id = MessageId::generate();
        self.documents.insert(id, Message::from_draft(id, draft, timestamp));
        Ok(id)
    }

    async fn replace_one(&self, message: &Message) -> Result<u64> {
        match self.documents.get_mut(&message.id) {
            Some(mut entry) => {
                *entry = message.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_one_and_delete(&self, id: MessageId) -> Result<Option<Message>> {
        Ok(self.documents.remove(&id).map(|(_, message)| message))
    }
}
