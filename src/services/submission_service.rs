//! Submission service
//!
//! Creating a submission touches three stores in a fixed order:
//!
//! 1. the source is written to the blob store under
//!    `<problem_id>/submissions/<id>`,
//! 2. the record is put into the submission table,
//! 3. the id is pushed onto the judge queue.
//!
//! The steps are not atomic. A failure after step 1 leaves an unreferenced
//! blob; a failure after step 2 leaves a visible submission that no judge
//! will pick up until [`SubmissionService::redispatch_unjudged`] runs. Each
//! step is keyed by the submission id, so repeating any of them is harmless.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    db::repositories::SubmissionTable,
    error::{AppError, AppResult},
    messaging::JobQueue,
    models::{Submission, SubmissionView},
    storage::BlobStore,
    utils::now_unix,
};

/// Submission source code together with its record
#[derive(Debug, Clone)]
pub struct SubmissionSource {
    pub submission: Submission,
    pub source: String,
}

/// Submission service for business logic
pub struct SubmissionService {
    blobs: Arc<dyn BlobStore>,
    table: Arc<dyn SubmissionTable>,
    queue: Arc<dyn JobQueue>,
    /// `Cache-Control` attached to uploaded source
    cache_control: String,
}

impl SubmissionService {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        table: Arc<dyn SubmissionTable>,
        queue: Arc<dyn JobQueue>,
        cache_control: impl Into<String>,
    ) -> Self {
        Self {
            blobs,
            table,
            queue,
            cache_control: cache_control.into(),
        }
    }

    /// Create a new submission and queue it for judging
    pub async fn create(
        &self,
        problem_id: &str,
        user_id: &str,
        code_text: &str,
        language: &str,
    ) -> AppResult<Submission> {
        if language.is_empty() {
            return Err(AppError::InvalidInput("language is required".to_string()));
        }
        if code_text.is_empty() {
            return Err(AppError::InvalidInput("code is required".to_string()));
        }

        let id = Uuid::new_v4();
        let code_key = Submission::code_key(problem_id, &id);

        self.blobs
            .put(&code_key, code_text.as_bytes().to_vec(), &self.cache_control)
            .await?;

        let submission = Submission {
            id,
            created_at: now_unix(),
            problem_id: problem_id.to_string(),
            user_id: user_id.to_string(),
            language: language.to_string(),
            code: code_key,
            result: None,
        };

        if let Err(e) = self.table.put(&submission).await {
            warn!(
                submission_id = %id,
                key = %submission.code,
                "Submission record not persisted, source blob left orphaned"
            );
            return Err(e);
        }

        if let Err(e) = self.queue.push(&id).await {
            error!(
                submission_id = %id,
                problem_id = %problem_id,
                error = %e,
                "Submission persisted but not dispatched, it stays in WJ until redispatched"
            );
            return Err(e);
        }

        info!(
            submission_id = %id,
            problem_id = %problem_id,
            user_id = %user_id,
            language = %language,
            "Submission created and queued for judging"
        );

        Ok(submission)
    }

    /// Get submission by ID
    pub async fn get(&self, id: &Uuid) -> AppResult<SubmissionView> {
        let submission = self
            .table
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        Ok(submission.into_view())
    }

    /// List every submission for a problem, oldest first
    pub async fn list_by_problem(&self, problem_id: &str) -> AppResult<Vec<SubmissionView>> {
        let submissions = self.table.query_by_problem(problem_id).await?;

        Ok(submissions.into_iter().map(Submission::into_view).collect())
    }

    /// Get the record and the submitted source text
    pub async fn get_source(&self, id: &Uuid) -> AppResult<SubmissionSource> {
        let submission = self
            .table
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        let bytes = self.blobs.get(&submission.code).await?;
        let source = String::from_utf8(bytes)
            .map_err(|e| AppError::Storage(format!("Source of {} is not UTF-8: {}", id, e)))?;

        Ok(SubmissionSource { submission, source })
    }

    /// Re-enqueue submissions that have gone `older_than_seconds` without a
    /// result since they were last pushed to the judge queue. Returns how many
    /// ids were pushed.
    ///
    /// Each pushed id is stamped as dispatched, so it is not pushed again
    /// until another full window passes, and rows behind it in line get their
    /// turn on the next call.
    pub async fn redispatch_unjudged(
        &self,
        older_than_seconds: i64,
        limit: i64,
    ) -> AppResult<usize> {
        let now = now_unix();
        let stuck = self
            .table
            .list_unjudged(now - older_than_seconds, limit)
            .await?;

        for submission in &stuck {
            self.queue.push(&submission.id).await?;
            self.table.mark_dispatched(&submission.id, now).await?;
            info!(
                submission_id = %submission.id,
                created_at = submission.created_at,
                "Unjudged submission redispatched"
            );
        }

        Ok(stuck.len())
    }
}
