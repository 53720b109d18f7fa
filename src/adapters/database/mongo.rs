use crate::adapters::database::MessageStore;
use crate::adapters::database::records::MessageRecord;
use crate::config::DatabaseConfig;
use crate::domain::message::{Message, MessageDraft, MessageId};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use time::OffsetDateTime;

const APP_NAME: &str = "message-store-server";

#[derive(Clone, Debug)]
pub struct MongoMessageStore {
    database: Database,
    collection: Collection<MessageRecord>,
}

impl MongoMessageStore {
    /// Connects to the document store and verifies it answers a ping.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the URL is invalid or the server is unreachable.
    #[tracing::instrument(level = "debug", skip(config), fields(db.name = %config.name, db.collection = %config.collection))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(Duration::from_secs(config.server_selection_timeout_secs));

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);
        let store = Self { collection: database.collection(&config.collection), database };

        store.ping().await?;
        tracing::info!("Connected to document store");

        Ok(store)
    }
}

#[async_trait]
impl MessageStore for MongoMessageStore {
    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_all(&self) -> Result<Vec<Message>> {
        let cursor = self.collection.find(doc! {}).await?;
        let records: Vec<MessageRecord> = cursor.try_collect().await?;

        Ok(records.into_iter().filter_map(MessageRecord::into_message).collect())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_one(&self, id: MessageId) -> Result<Option<Message>> {
        let record = self.collection.find_one(doc! { "_id": id.as_object_id() }).await?;
        Ok(record.and_then(MessageRecord::into_message))
    }

    #[tracing::instrument(level = "debug", skip(self, draft))]
    async fn insert_one(&self, draft: MessageDraft, timestamp: OffsetDateTime) -> Result<MessageId> {
        let result = self.collection.insert_one(MessageRecord::from_draft(draft, timestamp)).await?;

        result.inserted_id.as_object_id().map(MessageId::from).ok_or_else(|| {
            tracing::error!(inserted_id = %result.inserted_id, "Store returned a non-ObjectId identifier");
            AppError::Internal
        })
    }

    #[tracing::instrument(level = "debug", skip(self, message), fields(message_id = %message.id))]
    async fn replace_one(&self, message: &Message) -> Result<u64> {
        let result =
            self.collection.replace_one(doc! { "_id": message.id.as_object_id() }, MessageRecord::from(message)).await?;
        Ok(result.matched_count)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_one_and_delete(&self, id: MessageId) -> Result<Option<Message>> {
        let record = self.collection.find_one_and_delete(doc! { "_id": id.as_object_id() }).await?;
        Ok(record.and_then(MessageRecord::into_message))
    }
}
