mod config;

use anyhow::Result;
use common::nats::NatsClient;
use relay_worker::{RelayWorker, RelayWorkerConfig};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let config = match config::ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Starting edge-relay service");
    info!("Configuration: {:?}", config);

    if let Err(e) = run_service(config).await {
        error!(error = %e, "Service exited with error");
        std::process::exit(1);
    }
}

async fn run_service(config: config::ServiceConfig) -> Result<()> {
    let nats_client = NatsClient::connect(
        &config.nats_url,
        Duration::from_secs(config.nats_connect_timeout_secs),
    )
    .await?;
    nats_client.ensure_stream(&config.nats_stream).await?;

    let worker = RelayWorker::new(
        &nats_client,
        RelayWorkerConfig {
            stream: config.nats_stream,
            consumer_name: config.consumer_name,
            input_subject: config.input_subject,
            output_subject: config.output_subject,
            batch_size: config.nats_batch_size,
            batch_wait_secs: config.nats_batch_wait_secs,
            mongo_url: config.mongo_url,
            mongo_database: config.mongo_database,
            mongo_collection: config.mongo_collection,
        },
    )
    .await?;

    // Cancel the consumer loop on SIGINT/SIGTERM
    let ctx = CancellationToken::new();
    let signal_ctx = ctx.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");
        signal_ctx.cancel();
    });

    worker.run(ctx).await?;

    nats_client.close().await;
    info!("Service stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
