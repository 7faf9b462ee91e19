//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod submission_repo;

pub use submission_repo::{SubmissionRepository, SubmissionTable};
