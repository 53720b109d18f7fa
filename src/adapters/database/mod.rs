pub mod memory;
pub mod mongo;
pub mod records;

pub use memory::InMemoryMessageStore;
pub use mongo::MongoMessageStore;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::domain::message::{Message, MessageDraft, MessageId};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;

/// Handle to the collection holding message documents.
///
/// Implementations are shared by every request and must be safe to call concurrently.
#[async_trait]
pub trait MessageStore: Send + Sync + std::fmt::Debug + 'static {
    async fn ping(&self) -> Result<()>;

    async fn find_all(&self) -> Result<Vec<Message>>;

    async fn find_one(&self, id: MessageId) -> Result<Option<Message>>;

    /// Persists a new document and returns the identifier the store generated for it.
    async fn insert_one(&self, draft: MessageDraft, timestamp: OffsetDateTime) -> Result<MessageId>;

    /// Overwrites the document whose id matches `message.id` in one store command.
    /// Returns the number of matched documents.
    async fn replace_one(&self, message: &Message) -> Result<u64>;

    /// Removes the document in one store command and returns its last state.
    async fn find_one_and_delete(&self, id: MessageId) -> Result<Option<Message>>;
}

/// Opens the store selected by configuration.
///
/// # Errors
/// Returns an error if the document store cannot be reached.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn MessageStore>> {
    match config.store_backend {
        StoreBackend::Mongo => Ok(Arc::new(MongoMessageStore::connect(config).await?)),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory message store, data will not survive a restart");
            Ok(Arc::new(InMemoryMessageStore::new()))
        }
    }
}
