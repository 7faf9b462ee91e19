//! Submission response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::constants::WAITING_FOR_JUDGE;
use crate::models::{SubmissionStatus, SubmissionView};

/// Submission response
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub created_at: i64,
    pub problem_id: String,
    pub user_id: String,
    pub language: String,
    /// Blob key of the source
    pub code: String,
    pub result: ResultResponse,
}

/// Verdict plus whatever else the judge reported
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub code: String,
    pub is_finished: bool,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl From<SubmissionStatus> for ResultResponse {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Pending => Self {
                code: WAITING_FOR_JUDGE.to_string(),
                is_finished: false,
                details: serde_json::Map::new(),
            },
            SubmissionStatus::Finished(result) => {
                let mut details = result.details;
                // never trust a stored flag
                details.remove("is_finished");
                Self {
                    code: result.code,
                    is_finished: true,
                    details,
                }
            }
        }
    }
}

impl From<SubmissionView> for SubmissionResponse {
    fn from(view: SubmissionView) -> Self {
        let submission = view.submission;
        Self {
            id: submission.id,
            created_at: submission.created_at,
            problem_id: submission.problem_id,
            user_id: submission.user_id,
            language: submission.language,
            code: submission.code,
            result: view.status.into(),
        }
    }
}

/// Source code response
#[derive(Debug, Serialize)]
pub struct SubmissionSourceResponse {
    pub submission_id: Uuid,
    pub language: String,
    pub source: String,
}
