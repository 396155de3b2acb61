use anyhow::{Context, Result};
use async_nats::jetstream::{self, consumer::PullConsumer, Message};
use futures::{future::BoxFuture, StreamExt};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Type alias for the per-message processor function
/// Takes a raw NATS message and decides its disposition: Ok acknowledges the
/// message, Err rejects it for redelivery. The processor is responsible for
/// adapting the message and running the business logic.
pub type MessageProcessor =
    Box<dyn Fn(&Message) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// JetStream consumer that delivers messages to a processor one at a time
/// The consumer handles fetching, acknowledgments, and error handling;
/// everything else is delegated to the processor function.
pub struct NatsConsumer {
    consumer: PullConsumer,
    batch_size: usize,
    max_wait: Duration,
    processor: MessageProcessor,
}

impl NatsConsumer {
    pub async fn new(
        jetstream: &jetstream::Context,
        stream_name: &str,
        consumer_name: &str,
        subject_filter: &str,
        batch_size: usize,
        max_wait_secs: u64,
        processor: MessageProcessor,
    ) -> Result<Self> {
        debug!(
            stream = stream_name,
            consumer = consumer_name,
            subject = subject_filter,
            "Creating JetStream consumer"
        );

        // Create or get existing durable consumer
        let consumer = jetstream
            .create_consumer_on_stream(
                jetstream::consumer::pull::Config {
                    name: Some(consumer_name.to_string()),
                    durable_name: Some(consumer_name.to_string()),
                    filter_subject: subject_filter.to_string(),
                    ack_policy: jetstream::consumer::AckPolicy::Explicit,
                    ..Default::default()
                },
                stream_name,
            )
            .await
            .context("Failed to create consumer")?;

        info!(
            stream = stream_name,
            consumer = consumer_name,
            "Consumer created successfully"
        );

        Ok(Self {
            consumer,
            batch_size,
            max_wait: Duration::from_secs(max_wait_secs),
            processor,
        })
    }

    pub async fn run(&self, ctx: CancellationToken) -> Result<()> {
        info!("Starting consumer loop");

        loop {
            tokio::select! {
                _ = ctx.cancelled() => {
                    info!("Received shutdown signal, stopping consumer");
                    break;
                }
                result = self.fetch_and_process() => {
                    if let Err(e) = result {
                        error!(error = %e, "Error processing fetched messages");
                        // Continue processing despite errors
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        }

        info!("Consumer stopped gracefully");
        Ok(())
    }

    async fn fetch_and_process(&self) -> Result<()> {
        debug!(
            batch_size = self.batch_size,
            max_wait_secs = self.max_wait.as_secs(),
            "Fetching messages"
        );

        let mut messages = self
            .consumer
            .fetch()
            .max_messages(self.batch_size)
            .expires(self.max_wait)
            .messages()
            .await
            .context("Failed to fetch messages")?;

        while let Some(result) = messages.next().await {
            let message = match result {
                Ok(msg) => msg,
                Err(e) => {
                    warn!(error = %e, "Error receiving message from fetch");
                    continue;
                }
            };

            // Each message is an independent invocation: the processor's
            // outcome decides the broker disposition. Rejected messages are
            // left to the broker's redelivery policy; no local retry.
            match (self.processor)(&message).await {
                Ok(()) => {
                    if let Err(e) = message.ack().await {
                        error!(error = %e, "Failed to acknowledge message");
                    }
                }
                Err(e) => {
                    error!(
                        subject = %message.subject,
                        error = %e,
                        "Rejecting message due to processing error"
                    );
                    if let Err(e) = message.ack_with(jetstream::AckKind::Nak(None)).await {
                        error!(error = %e, "Failed to reject message");
                    }
                }
            }
        }

        Ok(())
    }
}
