use crate::domain::{RelayOutcome, RelayService};
use async_nats::jetstream::Message;
use common::domain::EdgeMessage;
use common::nats::MessageProcessor;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Create a MessageProcessor that adapts raw NATS messages into EdgeMessages
/// and relays them through the domain service
///
/// Header values become metadata properties (first value wins when a header
/// carries several). An Ok result acknowledges the message; a relay error is
/// returned so the consumer rejects the message for broker-side redelivery.
pub fn create_relay_processor(service: Arc<RelayService>) -> MessageProcessor {
    Box::new(move |message: &Message| {
        let service = Arc::clone(&service);

        // Copy payload and headers out of the borrowed message before moving
        // into the async block
        let mut properties = HashMap::new();
        if let Some(headers) = message.headers.as_ref() {
            for (name, values) in headers.iter() {
                if let Some(value) = values.first() {
                    properties.insert(name.to_string(), value.to_string());
                }
            }
        }
        let inbound = EdgeMessage {
            payload: message.payload.clone(),
            properties,
        };
        let subject = message.subject.to_string();

        Box::pin(async move {
            match service.handle(inbound).await {
                Ok(RelayOutcome::Forwarded) => {
                    debug!(subject = %subject, "Relayed message");
                    Ok(())
                }
                // Empty payloads are acknowledged without further processing
                Ok(RelayOutcome::Skipped) => Ok(()),
                Err(e) => Err(anyhow::Error::new(e)),
            }
        })
    })
}

// Note: Unit tests for the processor are challenging because we cannot easily
// create actual NATS Message objects without a real NATS connection. The
// relay semantics behind it are covered by the RelayService tests; the
// adapter itself needs integration tests with real NATS infrastructure.
