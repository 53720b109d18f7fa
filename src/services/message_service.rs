use crate::adapters::database::MessageStore;
use crate::domain::message::{self, Message, MessageDraft, MessageId};
use crate::error::{AppError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    operation_timeout: Duration,
}

impl MessageService {
    #[must_use]
    pub fn new(store: Arc<dyn MessageStore>, operation_timeout: Duration) -> Self {
        Self { store, operation_timeout }
    }

    /// Runs one store round trip under the per-operation deadline. The store call
    /// is dropped, and thereby cancelled, when the deadline passes.
    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.operation_timeout, call).await.map_err(|_| AppError::Timeout)?
    }

    /// Returns every stored message. An empty store yields an empty list.
    ///
    /// # Errors
    /// Returns `AppError::Database` or `AppError::Timeout` if the store call fails.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_messages(&self) -> Result<Vec<Message>> {
        self.bounded(self.store.find_all()).await
    }

    /// # Errors
    /// Returns `AppError::BadRequest` for a malformed id, before the store is touched.
    /// Returns `AppError::NotFound` if no message has this id.
    /// Returns `AppError::Database` or `AppError::Timeout` if the store call fails.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_message(&self, raw_id: &str) -> Result<Message> {
        let id = MessageId::parse(raw_id)?;
        self.bounded(self.store.find_one(id)).await?.ok_or(AppError::NotFound)
    }

    /// Stores a new message stamped with the current time and returns the generated id.
    ///
    /// # Errors
    /// Returns `AppError::Database` or `AppError::Timeout` if the write fails.
    #[tracing::instrument(level = "debug", skip(self, draft))]
    pub async fn send_message(&self, draft: MessageDraft) -> Result<MessageId> {
        self.bounded(self.store.insert_one(draft, message::now())).await
    }

    /// Overwrites every field of an existing message. The id always comes from the
    /// path and the timestamp is reset to now.
    ///
    /// Callers validate the id with [`MessageId::parse`] before decoding the body.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the replace matched no message.
    /// Returns `AppError::Database` or `AppError::Timeout` if the store call fails.
    #[tracing::instrument(level = "debug", skip(self, draft))]
    pub async fn update_message(&self, id: MessageId, draft: MessageDraft) -> Result<Message> {
        let updated = Message::from_draft(id, draft, message::now());

        let matched = self.bounded(self.store.replace_one(&updated)).await?;
        if matched == 0 {
            return Err(AppError::NotFound);
        }

        Ok(updated)
    }

    /// Deletes a message and returns its last stored state.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` for a malformed id.
    /// Returns `AppError::NotFound` if no message has this id.
    /// Returns `AppError::Database` or `AppError::Timeout` if the store call fails.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete_message(&self, raw_id: &str) -> Result<Message> {
        let id = MessageId::parse(raw_id)?;
        self.bounded(self.store.find_one_and_delete(id)).await?.ok_or(AppError::NotFound)
    }
}
