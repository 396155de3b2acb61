use crate::domain::RelayService;
use crate::nats::create_relay_processor;
use anyhow::Result;
use common::mongo::MongoDocumentStore;
use common::nats::{NatsClient, NatsConsumer, RoutePublisher};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct RelayWorkerConfig {
    pub stream: String,
    pub consumer_name: String,
    pub input_subject: String,
    pub output_subject: String,
    pub batch_size: usize,
    pub batch_wait_secs: u64,
    pub mongo_url: String,
    pub mongo_database: String,
    pub mongo_collection: String,
}

/// Wires the relay service to its broker and storage endpoints and drives
/// the consumer loop.
pub struct RelayWorker {
    consumer: NatsConsumer,
}

impl RelayWorker {
    pub async fn new(nats_client: &NatsClient, config: RelayWorkerConfig) -> Result<Self> {
        debug!("initializing relay worker module");

        let pipe = Arc::new(RoutePublisher::new(
            nats_client.jetstream().clone(),
            config.output_subject,
        ));
        let store = Arc::new(MongoDocumentStore::new(
            config.mongo_url,
            config.mongo_database,
            config.mongo_collection,
        ));
        let service = Arc::new(RelayService::new(pipe, store));

        let consumer = NatsConsumer::new(
            nats_client.jetstream(),
            &config.stream,
            &config.consumer_name,
            &config.input_subject,
            config.batch_size,
            config.batch_wait_secs,
            create_relay_processor(service),
        )
        .await?;

        Ok(Self { consumer })
    }

    pub async fn run(&self, ctx: CancellationToken) -> Result<()> {
        self.consumer.run(ctx).await
    }
}
