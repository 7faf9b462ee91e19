//! Judge dispatch queue

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Queue of submissions waiting to be judged.
///
/// Delivery is at-least-once; judges resolve the id through the read API and
/// must tolerate seeing the same id twice.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue one message whose body is exactly the submission id.
    async fn push(&self, submission_id: &Uuid) -> AppResult<()>;
}

/// Redis list used as the judge queue (`LPUSH` here, `BRPOP` on the judge side)
#[derive(Clone)]
pub struct RedisJobQueue {
    redis: ConnectionManager,
    queue: String,
}

impl RedisJobQueue {
    pub fn new(redis: ConnectionManager, queue: impl Into<String>) -> Self {
        Self {
            redis,
            queue: queue.into(),
        }
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn push(&self, submission_id: &Uuid) -> AppResult<()> {
        let mut redis = self.redis.clone();

        redis
            .lpush::<_, _, ()>(&self.queue, submission_id.to_string())
            .await
            .map_err(|e| AppError::Dispatch(e.to_string()))?;

        debug!(queue = %self.queue, submission_id = %submission_id, "Submission enqueued");
        Ok(())
    }
}
