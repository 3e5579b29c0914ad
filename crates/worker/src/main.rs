use diagroup_client::{ClientConfig, PlatformClient};
use diagroup_pipeline::{JoinConfig, JoinElements};
use diagroup_worker::{poller, WorkerConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diagroup_worker=debug,diagroup_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let worker = WorkerConfig::from_env().expect("Invalid worker configuration");
    let join_config = JoinConfig::from_env().expect("Invalid join configuration");
    let client_config = ClientConfig::from_env().expect("Invalid platform client configuration");

    let client = PlatformClient::new(&client_config).expect("Failed to build platform client");
    tracing::info!(api_url = %client_config.api_url, "Platform client ready");

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
                cancel.cancel();
            }
        }
    });

    tracing::info!(
        source_pool_id = %worker.source_pool_id,
        target_pool_id = %join_config.target_pool_id,
        "Worker starting"
    );

    let join = JoinElements::new(join_config, client);
    poller::run(join, &worker.source_pool_id, worker.poll_interval, cancel).await;

    tracing::info!("Worker stopped");
}
