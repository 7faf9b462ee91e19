//! Message published on the result bus when a judgment is finished

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::JudgeResult;

/// Finished judgment as seen by bus subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMessage {
    pub submission_id: Uuid,
    pub problem_id: String,
    pub user_id: String,
    pub language: String,
    pub result: JudgeResult,
}
