use crate::domain::message::EdgeMessage;
use crate::domain::result::RelayResult;
use async_trait::async_trait;

/// Trait for submitting outbound messages to the output route
///
/// Implementations should:
/// - Attach the message properties as transport metadata
/// - Publish to the fixed output route and await the broker acknowledgment
/// - Return error if the submission fails
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MessagePipe: Send + Sync {
    /// Submit a single outbound message
    ///
    /// Ownership of the message transfers to the pipe; the caller does not
    /// retain it after submission.
    async fn send(&self, message: EdgeMessage) -> RelayResult<()>;
}

/// Trait for inserting one semi-structured document into the storage backend
/// Infrastructure layer (common::mongo) implements this trait
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a single document as a new record; create-only, no update or
    /// delete paths exist in the relay.
    async fn insert(
        &self,
        document: serde_json::Map<String, serde_json::Value>,
    ) -> RelayResult<()>;
}
