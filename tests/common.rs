#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    missing_debug_implementations,
    unreachable_pub,
    dead_code
)]

use async_trait::async_trait;
use message_store_server::adapters::database::{InMemoryMessageStore, MessageStore};
use message_store_server::config::{
    Config, DatabaseConfig, HealthConfig, LogFormat, ServerConfig, StoreBackend, TelemetryConfig,
};
use message_store_server::domain::message::{Message, MessageDraft, MessageId};
use message_store_server::error::{AppError, Result};
use message_store_server::{AppBuilder, api};
use serde_json::Value;
use std::sync::{Arc, Once};
use time::OffsetDateTime;
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("message_store_server=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

pub fn get_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mgmt_port: 0,
            shutdown_timeout_secs: 1,
        },
        database: DatabaseConfig {
            url: "mongodb://localhost:27017".to_string(),
            name: "message_store_test".to_string(),
            collection: "messages".to_string(),
            operation_timeout_secs: 1,
            server_selection_timeout_secs: 1,
            store_backend: StoreBackend::Memory,
        },
        health: HealthConfig { db_timeout_ms: 200 },
        telemetry: TelemetryConfig { log_format: LogFormat::Text, otlp_endpoint: None },
    }
}

/// A store whose every call either fails or never answers.
#[derive(Debug)]
pub struct UnavailableStore {
    pub stall: bool,
}

impl UnavailableStore {
    async fn fail<T>(&self) -> Result<T> {
        if self.stall {
            std::future::pending::<()>().await;
        }
        Err(AppError::Internal)
    }
}

#[async_trait]
impl MessageStore for UnavailableStore {
    async fn ping(&self) -> Result<()> {
        self.fail().await
    }

    async fn find_all(&self) -> Result<Vec<Message>> {
        self.fail().await
    }

    async fn find_one(&self, _id: MessageId) -> Result<Option<Message>> {
        self.fail().await
    }

    async fn insert_one(&self, _draft: MessageDraft, _timestamp: OffsetDateTime) -> Result<MessageId> {
        self.fail().await
    }

    async fn replace_one(&self, _message: &Message) -> Result<u64> {
        self.fail().await
    }

    async fn find_one_and_delete(&self, _id: MessageId) -> Result<Option<Message>> {
        self.fail().await
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryMessageStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn MessageStore>) -> Self {
        setup_tracing();
        let config = get_test_config();

        let app = AppBuilder::new(config).with_store(store).build().unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let app_router = api::app_router(app.state);
        let mgmt_router = api::mgmt_router(app.mgmt_state);
        tokio::spawn(async move { axum::serve(listener, app_router).await.unwrap() });
        tokio::spawn(async move { axum::serve(mgmt_listener, mgmt_router).await.unwrap() });

        Self { server_url, mgmt_url, client: reqwest::Client::new() }
    }

    pub fn message_url(&self, id: &str) -> String {
        format!("{}/messages/{id}", self.server_url)
    }

    /// Creates a message and returns its id.
    pub async fn send_message(&self, recipient: &str, sender: &str, content: &str) -> String {
        let resp = self
            .client
            .post(format!("{}/messages", self.server_url))
            .json(&serde_json::json!({ "recipient": recipient, "sender": sender, "content": content }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        match resp.json::<Value>().await.unwrap() {
            Value::String(id) => id,
            other => panic!("Expected a bare string id, got {other}"),
        }
    }
}
