use crate::domain::{DocumentStore, RelayError, RelayResult};
use crate::mongo::client::shared_client;
use async_trait::async_trait;
use mongodb::bson::{self, Document};
use tracing::debug;

/// Concrete implementation of DocumentStore backed by MongoDB
///
/// Resolves the shared client on every insert, so the client is constructed
/// on the first stored message rather than at service startup.
pub struct MongoDocumentStore {
    url: String,
    database: String,
    collection: String,
}

impl MongoDocumentStore {
    pub fn new(url: String, database: String, collection: String) -> Self {
        Self {
            url,
            database,
            collection,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn insert(
        &self,
        document: serde_json::Map<String, serde_json::Value>,
    ) -> RelayResult<()> {
        let document: Document =
            bson::to_document(&document).map_err(|e| RelayError::DocumentParse(e.to_string()))?;

        let client = shared_client(&self.url).await?;
        let collection = client
            .database(&self.database)
            .collection::<Document>(&self.collection);

        collection
            .insert_one(document)
            .await
            .map_err(|e| RelayError::StoreInsert(e.to_string()))?;

        debug!(
            database = %self.database,
            collection = %self.collection,
            "Inserted document"
        );
        Ok(())
    }
}
