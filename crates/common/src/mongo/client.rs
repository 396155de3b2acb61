use crate::domain::{RelayError, RelayResult};
use mongodb::Client;
use tokio::sync::OnceCell;
use tracing::info;

static MONGO_CLIENT: OnceCell<Client> = OnceCell::const_new();

/// Process-wide MongoDB client handle, created on first access and reused for
/// the life of the process.
///
/// Construction only parses the connection string and sets up the driver's
/// pool; sockets are opened lazily by the driver when the first operation
/// runs. Concurrent first callers are serialized by the cell, so exactly one
/// client is ever constructed. A construction failure is not cached: it
/// propagates to the caller and the next access retries.
pub async fn shared_client(url: &str) -> RelayResult<&'static Client> {
    MONGO_CLIENT
        .get_or_try_init(|| async {
            info!(url = %url, "Initializing MongoDB client");
            Client::with_uri_str(url)
                .await
                .map_err(|e| RelayError::ClientInit(e.to_string()))
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_URL: &str = "mongodb://localhost:27017";

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_access_returns_one_handle() {
        // with_uri_str only parses the URI, so this runs without a server
        let mut handles = Vec::new();
        for _ in 0..16 {
            handles.push(tokio::spawn(async { shared_client(TEST_URL).await }));
        }

        let mut clients = Vec::new();
        for handle in handles {
            clients.push(handle.await.unwrap().expect("client construction failed"));
        }

        let first = clients[0] as *const Client;
        for client in clients {
            assert!(std::ptr::eq(first, client as *const Client));
        }

        // A later call still returns the same handle
        let again = shared_client(TEST_URL).await.unwrap();
        assert!(std::ptr::eq(first, again as *const Client));
    }
}
