//! JudgeGate - submission intake and result distribution
//!
//! This library accepts code submissions for an online judge, stores the
//! source and the submission record, queues the submission for an external
//! judge and exposes its status. A notifier fans finished results out to
//! subscribers.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Submission lifecycle and result notification
//! - **Repositories / storage / messaging**: adapters over PostgreSQL,
//!   S3 and Redis, each behind a trait
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod messaging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
