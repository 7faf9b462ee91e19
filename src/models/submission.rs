//! Submission model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{SUBMISSIONS_SEGMENT, WAITING_FOR_JUDGE};

/// Submission record as persisted in the submission table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    /// Seconds since the Unix epoch
    pub created_at: i64,
    pub problem_id: String,
    pub user_id: String,
    pub language: String,
    /// Blob key of the submitted source, see [`Submission::code_key`]
    pub code: String,
    /// Written by the judge once judging completes
    pub result: Option<JudgeResult>,
}

impl Submission {
    /// Blob key for a submission's source: `<problem_id>/submissions/<id>`
    pub fn code_key(problem_id: &str, id: &Uuid) -> String {
        format!("{}/{}/{}", problem_id, SUBMISSIONS_SEGMENT, id)
    }

    /// Derive the judging status from the stored result
    pub fn status(&self) -> SubmissionStatus {
        SubmissionStatus::derive(self.result.as_ref())
    }

    /// Attach the derived status for readers
    pub fn into_view(self) -> SubmissionView {
        let status = self.status();
        SubmissionView {
            submission: self,
            status,
        }
    }
}

/// Judged outcome reported by the external judge.
///
/// Only `code` is interpreted here. Score, timing and diagnostics fields are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeResult {
    /// Verdict tag, e.g. `AC` or `WA`
    pub code: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl JudgeResult {
    /// Result with a verdict and no extra judge fields
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            details: serde_json::Map::new(),
        }
    }

    /// Add an opaque judge field
    pub fn with_detail(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }

    /// Whether the verdict is the reserved "waiting for judge" tag
    pub fn is_waiting(&self) -> bool {
        self.code == WAITING_FOR_JUDGE
    }
}

/// Judging status, computed at read time and never stored
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStatus {
    Pending,
    Finished(JudgeResult),
}

impl SubmissionStatus {
    /// A missing result, or one carrying the reserved `WJ` tag, is pending.
    pub fn derive(result: Option<&JudgeResult>) -> Self {
        match result {
            Some(result) if !result.is_waiting() => Self::Finished(result.clone()),
            _ => Self::Pending,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// Verdict tag shown to clients
    pub fn verdict(&self) -> &str {
        match self {
            Self::Pending => WAITING_FOR_JUDGE,
            Self::Finished(result) => &result.code,
        }
    }
}

/// A submission together with its derived status
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionView {
    pub submission: Submission,
    pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(result: Option<JudgeResult>) -> Submission {
        let id = Uuid::new_v4();
        Submission {
            id,
            created_at: 1_700_000_000,
            problem_id: "p1".to_string(),
            user_id: "u1".to_string(),
            language: "python".to_string(),
            code: Submission::code_key("p1", &id),
            result,
        }
    }

    #[test]
    fn test_code_key() {
        let id = Uuid::nil();
        assert_eq!(
            Submission::code_key("p1", &id),
            "p1/submissions/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_missing_result_is_pending() {
        let status = submission(None).status();
        assert_eq!(status, SubmissionStatus::Pending);
        assert!(!status.is_finished());
        assert_eq!(status.verdict(), "WJ");
    }

    #[test]
    fn test_stored_verdict_is_finished() {
        let status = submission(Some(JudgeResult::new("AC"))).status();
        assert!(status.is_finished());
        assert_eq!(status.verdict(), "AC");
    }

    #[test]
    fn test_stored_wj_is_not_finished() {
        let status = submission(Some(JudgeResult::new("WJ"))).status();
        assert_eq!(status, SubmissionStatus::Pending);
    }

    #[test]
    fn test_judge_fields_pass_through() {
        let raw = serde_json::json!({"code": "WA", "score": 40, "time_ms": 12});
        let result: JudgeResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(result.code, "WA");
        assert_eq!(result.details["score"], 40);
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }
}
