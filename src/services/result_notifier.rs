//! Result notifier
//!
//! Called by the judge once a verdict is final. The message is published once;
//! retries and loss handling belong to the caller.

use std::sync::Arc;

use redis::aio::ConnectionManager;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    config::RedisConfig,
    error::{AppError, AppResult},
    messaging::{RedisResultBus, ResultBus},
    models::{JudgeResult, ResultMessage},
};

/// Publishes finished judgments to the result bus
pub struct ResultNotifier {
    bus: Arc<dyn ResultBus>,
    topic: String,
}

impl ResultNotifier {
    pub fn new(bus: Arc<dyn ResultBus>, topic: impl Into<String>) -> Self {
        Self {
            bus,
            topic: topic.into(),
        }
    }

    /// Notifier publishing to the configured result channel
    pub fn from_config(bus: Arc<dyn ResultBus>, config: &RedisConfig) -> Self {
        Self::new(bus, config.result_channel.clone())
    }

    /// Notifier over Redis pub/sub on the configured result channel
    pub fn redis(redis: ConnectionManager, config: &RedisConfig) -> Self {
        Self::from_config(Arc::new(RedisResultBus::new(redis)), config)
    }

    /// Publish one finished judgment
    pub async fn send(
        &self,
        submission_id: Uuid,
        problem_id: &str,
        user_id: &str,
        language: &str,
        result: JudgeResult,
    ) -> AppResult<()> {
        let message = ResultMessage {
            submission_id,
            problem_id: problem_id.to_string(),
            user_id: user_id.to_string(),
            language: language.to_string(),
            result,
        };

        let payload = serde_json::to_string(&message)
            .map_err(|e| AppError::Notification(format!("Failed to encode result: {}", e)))?;

        if let Err(e) = self.bus.publish(&self.topic, payload).await {
            warn!(
                submission_id = %submission_id,
                topic = %self.topic,
                error = %e,
                "Result notification not published"
            );
            return Err(e);
        }

        debug!(
            submission_id = %submission_id,
            verdict = %message.result.code,
            "Result notification published"
        );
        Ok(())
    }
}
