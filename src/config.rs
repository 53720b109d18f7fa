use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "MSGSTORE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "MSGSTORE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Port for the management server (health probes)
    #[arg(long, env = "MSGSTORE_MGMT_PORT", default_value_t = 8081)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight requests to drain on shutdown
    #[arg(long, env = "MSGSTORE_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Document store connection URL
    #[arg(long = "database-url", env = "MSGSTORE_DATABASE_URL", default_value = "mongodb://localhost:27017")]
    pub url: String,

    /// Database holding the message collection
    #[arg(long = "database-name", env = "MSGSTORE_DATABASE_NAME", default_value = "message_store")]
    pub name: String,

    /// Collection holding message documents
    #[arg(long = "database-collection", env = "MSGSTORE_DATABASE_COLLECTION", default_value = "messages")]
    pub collection: String,

    /// Deadline applied to every individual store operation
    #[arg(long, env = "MSGSTORE_OPERATION_TIMEOUT_SECS", default_value_t = 5)]
    pub operation_timeout_secs: u64,

    /// How long the driver waits to find a usable server
    #[arg(long, env = "MSGSTORE_SERVER_SELECTION_TIMEOUT_SECS", default_value_t = 5)]
    pub server_selection_timeout_secs: u64,

    /// Which store implementation backs the service
    #[arg(long, env = "MSGSTORE_STORE_BACKEND", value_enum, default_value_t = StoreBackend::Mongo)]
    pub store_backend: StoreBackend,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the store readiness check
    #[arg(long = "health-db-timeout-ms", env = "MSGSTORE_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "MSGSTORE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP gRPC endpoint for traces and metrics (disabled when unset)
    #[arg(long, env = "MSGSTORE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
