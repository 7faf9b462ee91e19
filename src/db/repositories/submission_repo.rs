//! Submission repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, types::Json};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{JudgeResult, Submission},
};

/// Durable table of submission records.
///
/// Records are written once by this service. Only the judge adds a result
/// afterwards, outside of this trait. Alongside each record the table keeps
/// the time it was last pushed to the judge queue (`dispatched_at`), which
/// starts at `created_at`.
#[async_trait]
pub trait SubmissionTable: Send + Sync {
    /// Persist a full record. Putting the same id again is a no-op.
    async fn put(&self, submission: &Submission) -> AppResult<()>;

    /// Find a record by id
    async fn get(&self, id: &Uuid) -> AppResult<Option<Submission>>;

    /// All records for a problem, oldest first (`created_at`, then `id`)
    async fn query_by_problem(&self, problem_id: &str) -> AppResult<Vec<Submission>>;

    /// Records without a result last dispatched at or before
    /// `dispatched_before`, least recently dispatched first
    async fn list_unjudged(
        &self,
        dispatched_before: i64,
        limit: i64,
    ) -> AppResult<Vec<Submission>>;

    /// Record that `id` was pushed to the judge queue again at `dispatched_at`
    async fn mark_dispatched(&self, id: &Uuid, dispatched_at: i64) -> AppResult<()>;
}

/// Row shape of the `submissions` table
#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: Uuid,
    created_at: i64,
    problem_id: String,
    user_id: String,
    language: String,
    code: String,
    result: Option<Json<JudgeResult>>,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            problem_id: row.problem_id,
            user_id: row.user_id,
            language: row.language,
            code: row.code,
            result: row.result.map(|Json(result)| result),
        }
    }
}

/// PostgreSQL implementation of [`SubmissionTable`]
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionTable for SubmissionRepository {
    async fn put(&self, submission: &Submission) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO submissions
                (id, created_at, problem_id, user_id, language, code, result, dispatched_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(submission.id)
        .bind(submission.created_at)
        .bind(&submission.problem_id)
        .bind(&submission.user_id)
        .bind(&submission.language)
        .bind(&submission.code)
        .bind(submission.result.as_ref().map(Json))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: &Uuid) -> AppResult<Option<Submission>> {
        let row = sqlx::query_as::<_, SubmissionRow>(r#"SELECT * FROM submissions WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Submission::from))
    }

    async fn query_by_problem(&self, problem_id: &str) -> AppResult<Vec<Submission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT * FROM submissions
            WHERE problem_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(problem_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Submission::from).collect())
    }

    async fn list_unjudged(
        &self,
        dispatched_before: i64,
        limit: i64,
    ) -> AppResult<Vec<Submission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT * FROM submissions
            WHERE result IS NULL AND dispatched_at <= $1
            ORDER BY dispatched_at, id
            LIMIT $2
            "#,
        )
        .bind(dispatched_before)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Submission::from).collect())
    }

    async fn mark_dispatched(&self, id: &Uuid, dispatched_at: i64) -> AppResult<()> {
        sqlx::query(r#"UPDATE submissions SET dispatched_at = $2 WHERE id = $1"#)
            .bind(id)
            .bind(dispatched_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
