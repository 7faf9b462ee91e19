//! Submission handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    extractors::AppJson,
    middleware::auth::AuthenticatedUser,
    state::AppState,
};

use super::{
    request::CreateSubmissionRequest,
    response::{SubmissionResponse, SubmissionSourceResponse},
};

/// Ids that do not parse can never exist, so they are reported as not found.
fn parse_submission_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Submission not found".to_string()))
}

/// Create a new submission for a problem
pub async fn create_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(problem_id): Path<String>,
    AppJson(payload): AppJson<CreateSubmissionRequest>,
) -> AppResult<Json<SubmissionResponse>> {
    let submission = state
        .submissions()
        .create(&problem_id, &auth_user.id, &payload.code, &payload.language)
        .await?;

    Ok(Json(submission.into_view().into()))
}

/// List submissions for a problem
pub async fn list_problem_submissions(
    State(state): State<AppState>,
    Path(problem_id): Path<String>,
) -> AppResult<Json<Vec<SubmissionResponse>>> {
    let submissions = state.submissions().list_by_problem(&problem_id).await?;

    Ok(Json(submissions.into_iter().map(Into::into).collect()))
}

/// Get a specific submission
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SubmissionResponse>> {
    let id = parse_submission_id(&id)?;
    let submission = state.submissions().get(&id).await?;

    Ok(Json(submission.into()))
}

/// Get source code for a submission (owner only)
pub async fn get_submission_source(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<SubmissionSourceResponse>> {
    let id = parse_submission_id(&id)?;
    let source = state.submissions().get_source(&id).await?;

    if source.submission.user_id != auth_user.id {
        return Err(AppError::Forbidden(
            "Cannot view other users' source code".to_string(),
        ));
    }

    Ok(Json(SubmissionSourceResponse {
        submission_id: source.submission.id,
        language: source.submission.language,
        source: source.source,
    }))
}
