//! Submission request DTOs

use serde::Deserialize;

/// Create submission request.
///
/// Missing fields deserialize as empty strings so they are rejected as
/// invalid input rather than as a malformed body.
#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    /// Source code
    #[serde(default)]
    pub code: String,

    /// Programming language tag
    #[serde(default)]
    pub language: String,
}
