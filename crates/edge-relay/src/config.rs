use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // NATS configuration
    /// NATS server URL
    #[serde(default = "default_nats_url")]
    pub nats_url: String,

    /// NATS JetStream stream carrying both relay routes
    #[serde(default = "default_nats_stream")]
    pub nats_stream: String,

    /// Durable consumer name on the input route
    #[serde(default = "default_consumer_name")]
    pub consumer_name: String,

    /// Input route subject
    #[serde(default = "default_input_subject")]
    pub input_subject: String,

    /// Output route subject
    #[serde(default = "default_output_subject")]
    pub output_subject: String,

    /// Batch size for the consumer fetch
    #[serde(default = "default_nats_batch_size")]
    pub nats_batch_size: usize,

    /// Max wait time per fetch in seconds
    #[serde(default = "default_nats_batch_wait_secs")]
    pub nats_batch_wait_secs: u64,

    /// Connection timeout for the broker in seconds
    #[serde(default = "default_nats_connect_timeout_secs")]
    pub nats_connect_timeout_secs: u64,

    // MongoDB configuration
    /// MongoDB connection URL
    #[serde(default = "default_mongo_url")]
    pub mongo_url: String,

    /// Database receiving stored payloads
    #[serde(default = "default_mongo_database")]
    pub mongo_database: String,

    /// Collection receiving stored payloads
    #[serde(default = "default_mongo_collection")]
    pub mongo_collection: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

// NATS defaults
fn default_nats_url() -> String {
    "nats://localhost:4222".to_string()
}

fn default_nats_stream() -> String {
    "edge_messages".to_string()
}

fn default_consumer_name() -> String {
    "edge-relay".to_string()
}

fn default_input_subject() -> String {
    "edge_messages.input1".to_string()
}

fn default_output_subject() -> String {
    "edge_messages.output1".to_string()
}

fn default_nats_batch_size() -> usize {
    10
}

fn default_nats_batch_wait_secs() -> u64 {
    5
}

fn default_nats_connect_timeout_secs() -> u64 {
    5
}

// MongoDB defaults
fn default_mongo_url() -> String {
    "mongodb://mongodb:27017".to_string()
}

fn default_mongo_database() -> String {
    "sample_iot".to_string()
}

fn default_mongo_collection() -> String {
    "timeseries".to_string()
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("RELAY"))
            .build()?
            .try_deserialize()
    }
}
