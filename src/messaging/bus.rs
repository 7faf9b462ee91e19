//! Result fan-out bus

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Publish/subscribe channel for finished judgments.
///
/// Ordering and delivery guarantees are whatever the backing bus provides.
#[async_trait]
pub trait ResultBus: Send + Sync {
    /// Publish a serialized message to `topic`.
    async fn publish(&self, topic: &str, message: String) -> AppResult<()>;
}

/// Redis pub/sub implementation of [`ResultBus`]
#[derive(Clone)]
pub struct RedisResultBus {
    redis: ConnectionManager,
}

impl RedisResultBus {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl ResultBus for RedisResultBus {
    async fn publish(&self, topic: &str, message: String) -> AppResult<()> {
        let mut redis = self.redis.clone();

        let receivers: i64 = redis
            .publish(topic, message)
            .await
            .map_err(|e| AppError::Notification(e.to_string()))?;

        debug!(topic = %topic, receivers, "Result published");
        Ok(())
    }
}
