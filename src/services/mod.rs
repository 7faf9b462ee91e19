//! Business logic services

pub mod result_notifier;
pub mod submission_service;

pub use result_notifier::ResultNotifier;
pub use submission_service::{SubmissionService, SubmissionSource};
