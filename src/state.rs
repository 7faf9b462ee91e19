//! Application state management
//!
//! Shared, immutable handles passed to every request handler via Axum's
//! State extractor.

use std::sync::Arc;

use crate::config::Config;
use crate::services::SubmissionService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Submission lifecycle over the blob store, table and judge queue
    submissions: Arc<SubmissionService>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(submissions: Arc<SubmissionService>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                submissions,
                config,
            }),
        }
    }

    /// Get a reference to the submission service
    pub fn submissions(&self) -> &SubmissionService {
        &self.inner.submissions
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
