use anyhow::{Context, Result};
use async_nats::jetstream::{self, stream::Config as StreamConfig};
use tracing::info;

pub struct NatsClient {
    jetstream: jetstream::Context,
}

impl NatsClient {
    pub async fn connect(url: &str, timeout: std::time::Duration) -> Result<Self> {
        info!(url = %url, timeout_ms = timeout.as_millis(), "Connecting to NATS");

        // Configure connection timeout for establishing the TCP connection
        let client = async_nats::ConnectOptions::new()
            .connection_timeout(timeout)
            .connect(url)
            .await
            .context("Failed to connect to NATS")?;

        let jetstream = jetstream::new(client);

        info!("Successfully connected to NATS");
        Ok(Self { jetstream })
    }

    /// Ensure the relay stream exists, creating it when absent. Both the
    /// input and output routes are subjects under this stream.
    pub async fn ensure_stream(&self, stream_name: &str) -> Result<()> {
        info!(stream = %stream_name, "Ensuring stream exists");

        let stream_config = StreamConfig {
            name: stream_name.to_string(),
            subjects: vec![format!("{}.*", stream_name)],
            description: Some("Stream for edge relay routes".to_string()),
            ..Default::default()
        };

        match self.jetstream.get_stream(stream_name).await {
            Ok(_) => {
                info!(stream = %stream_name, "Stream already exists");
            }
            Err(_) => {
                self.jetstream
                    .create_stream(stream_config)
                    .await
                    .context("Failed to create stream")?;
                info!(stream = %stream_name, "Created stream");
            }
        }

        Ok(())
    }

    pub fn jetstream(&self) -> &jetstream::Context {
        &self.jetstream
    }

    pub async fn close(self) {
        info!("Closing NATS connection");
        // Connection closes automatically when dropped
    }
}
