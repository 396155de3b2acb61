use crate::domain::{EdgeMessage, MessagePipe, RelayError, RelayResult};
use async_nats::jetstream;
use async_nats::HeaderMap;
use async_trait::async_trait;
use tracing::{debug, info};

/// Concrete implementation of MessagePipe backed by NATS JetStream
///
/// Publishes the message payload to a fixed output subject, carrying the
/// metadata properties as NATS headers.
pub struct RoutePublisher {
    jetstream: jetstream::Context,
    subject: String,
}

impl RoutePublisher {
    pub fn new(jetstream: jetstream::Context, subject: String) -> Self {
        info!(subject = %subject, "Created RoutePublisher");
        Self { jetstream, subject }
    }
}

#[async_trait]
impl MessagePipe for RoutePublisher {
    async fn send(&self, message: EdgeMessage) -> RelayResult<()> {
        let mut headers = HeaderMap::new();
        for (key, value) in &message.properties {
            headers.insert(key.as_str(), value.as_str());
        }

        debug!(
            subject = %self.subject,
            payload_size = message.payload.len(),
            property_count = message.properties.len(),
            "Publishing outbound message"
        );

        let ack = self
            .jetstream
            .publish_with_headers(self.subject.clone(), headers, message.payload)
            .await
            .map_err(|e| RelayError::PipeSend(e.to_string()))?;

        // Await acknowledgment from JetStream
        ack.await
            .map_err(|e| RelayError::PipeSend(e.to_string()))?;

        Ok(())
    }
}
