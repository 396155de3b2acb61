use common::domain::{DocumentStore, EdgeMessage, MessagePipe, RelayError, RelayResult};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Outcome of one relay invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Empty payload, dropped without forwarding or storing
    Skipped,
    /// Forwarded to the output route; storage was attempted best-effort
    Forwarded,
}

/// Domain service that relays one inbound message
///
/// Flow:
/// 1. Drop empty payloads silently
/// 2. Forward the payload with copied metadata to the output route
/// 3. Decode the payload as UTF-8, parse as a JSON document, store it
///
/// Forwarding and storing are independent: a failure anywhere on the store
/// path is logged and discarded, while a forward failure fails the whole
/// invocation.
pub struct RelayService {
    pipe: Arc<dyn MessagePipe>,
    store: Arc<dyn DocumentStore>,
}

impl RelayService {
    pub fn new(pipe: Arc<dyn MessagePipe>, store: Arc<dyn DocumentStore>) -> Self {
        Self { pipe, store }
    }

    /// Handle one inbound message. Each invocation is stateless and
    /// independent of every other.
    #[instrument(skip(self, inbound), fields(payload_size = inbound.payload.len()))]
    pub async fn handle(&self, inbound: EdgeMessage) -> RelayResult<RelayOutcome> {
        // Empty payloads are a silent no-op: no forward, no store, no log.
        if inbound.payload.is_empty() {
            return Ok(RelayOutcome::Skipped);
        }

        info!("Received one non-empty message");

        let outbound = inbound.to_outbound();
        self.pipe.send(outbound).await?;

        // Best-effort: the store step must never undo or report against the
        // forward already performed above.
        if let Err(e) = self.store_payload(&inbound).await {
            error!(error = %e, "Error writing message to store");
        }

        info!("Piped out the message");
        Ok(RelayOutcome::Forwarded)
    }

    /// Decode the payload as UTF-8, parse it as a JSON document and insert it
    /// into the store as a new record.
    async fn store_payload(&self, message: &EdgeMessage) -> RelayResult<()> {
        let text = std::str::from_utf8(&message.payload)
            .map_err(|e| RelayError::PayloadDecode(e.to_string()))?;

        let document: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(text).map_err(|e| RelayError::DocumentParse(e.to_string()))?;

        self.store.insert(document).await?;

        info!("Stored the message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{MockDocumentStore, MockMessagePipe};

    fn message(payload: &str) -> EdgeMessage {
        EdgeMessage::new(payload.as_bytes().to_vec()).with_property("sensor", "A1")
    }

    #[tokio::test]
    async fn test_pipe_failure_fails_invocation_and_skips_store() {
        let mut pipe = MockMessagePipe::new();
        pipe.expect_send()
            .times(1)
            .returning(|_| Err(RelayError::PipeSend("broker unavailable".to_string())));

        let mut store = MockDocumentStore::new();
        store.expect_insert().times(0);

        let service = RelayService::new(Arc::new(pipe), Arc::new(store));
        let result = service.handle(message("{\"temp\":21.5}")).await;

        assert!(matches!(result, Err(RelayError::PipeSend(_))));
    }

    #[tokio::test]
    async fn test_store_failure_does_not_fail_invocation() {
        let mut pipe = MockMessagePipe::new();
        pipe.expect_send().times(1).returning(|_| Ok(()));

        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(RelayError::StoreInsert("connection refused".to_string())));

        let service = RelayService::new(Arc::new(pipe), Arc::new(store));
        let outcome = service.handle(message("{\"temp\":21.5}")).await.unwrap();

        assert_eq!(outcome, RelayOutcome::Forwarded);
    }

    #[tokio::test]
    async fn test_empty_payload_touches_neither_pipe_nor_store() {
        let mut pipe = MockMessagePipe::new();
        pipe.expect_send().times(0);

        let mut store = MockDocumentStore::new();
        store.expect_insert().times(0);

        let service = RelayService::new(Arc::new(pipe), Arc::new(store));
        let outcome = service.handle(EdgeMessage::new("")).await.unwrap();

        assert_eq!(outcome, RelayOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_non_json_payload_is_forwarded_but_not_stored() {
        let mut pipe = MockMessagePipe::new();
        pipe.expect_send().times(1).returning(|_| Ok(()));

        // Parsing fails before the store is ever reached
        let mut store = MockDocumentStore::new();
        store.expect_insert().times(0);

        let service = RelayService::new(Arc::new(pipe), Arc::new(store));
        let outcome = service.handle(message("not-json")).await.unwrap();

        assert_eq!(outcome, RelayOutcome::Forwarded);
    }
}
