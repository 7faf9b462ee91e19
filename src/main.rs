//! JudgeGate - Application Entry Point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use judgegate::{
    config::{Config, LogFormat, RedispatchConfig},
    db::{self, repositories::SubmissionRepository},
    handlers,
    messaging::RedisJobQueue,
    services::SubmissionService,
    state::AppState,
    storage::S3BlobStore,
};

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Periodically re-enqueue submissions that never reached a judge
fn spawn_redispatch_sweep(
    submissions: Arc<SubmissionService>,
    interval_seconds: u64,
    config: RedispatchConfig,
) {
    tracing::info!(
        interval_seconds,
        after_seconds = config.after_seconds,
        "Starting redispatch sweep"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds.max(1)));
        loop {
            ticker.tick().await;
            match submissions
                .redispatch_unjudged(config.after_seconds, config.batch)
                .await
            {
                Ok(0) => {}
                Ok(count) => tracing::info!(count, "Redispatched unjudged submissions"),
                Err(e) => tracing::error!(error = %e, "Redispatch sweep failed"),
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration is loaded once and passed down from here
    let config = Config::from_env()?;

    init_tracing(&config);

    tracing::info!("Starting JudgeGate server...");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(config.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    tracing::info!(bucket = %config.storage.bucket, "Configuring object storage...");
    let blobs = S3BlobStore::from_config(&config.storage).await;

    let submissions = SubmissionService::new(
        Arc::new(blobs),
        Arc::new(SubmissionRepository::new(db_pool)),
        Arc::new(RedisJobQueue::new(redis_conn, config.redis.judge_queue.clone())),
        config.storage.cache_control.clone(),
    );

    let submissions = Arc::new(submissions);

    if let Some(interval) = config.redispatch.interval_seconds {
        spawn_redispatch_sweep(submissions.clone(), interval, config.redispatch.clone());
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(submissions, config);
    let app = handlers::create_router(state);

    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
