pub mod domain;
pub mod mongo;
pub mod nats;

pub use domain::*;

// Re-export mocks when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use domain::MockDocumentStore;
#[cfg(any(test, feature = "testing"))]
pub use domain::MockMessagePipe;
