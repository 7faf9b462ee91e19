//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default tracing filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "judgegate=info,tower_http=info";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// REDIS DEFAULTS
// =============================================================================

/// Default Redis URL
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// List the judges pop submission ids from
pub const DEFAULT_JUDGE_QUEUE: &str = "judge_queue";

/// Pub/sub channel finished results are fanned out on
pub const DEFAULT_RESULT_CHANNEL: &str = "judge_results";

// =============================================================================
// OBJECT STORAGE DEFAULTS
// =============================================================================

/// Default S3 region
pub const DEFAULT_STORAGE_REGION: &str = "us-east-1";

/// Cache hint for submitted source. The blob under a submission key never
/// changes once written.
pub const DEFAULT_CODE_CACHE_CONTROL: &str = "public, max-age=86400";

/// Path segment between the problem id and the submission id in a blob key
pub const SUBMISSIONS_SEGMENT: &str = "submissions";

// =============================================================================
// JUDGING
// =============================================================================

/// Reserved verdict meaning "waiting for judge". A judge never reports it as
/// a final verdict.
pub const WAITING_FOR_JUDGE: &str = "WJ";

/// Default age (seconds) before an unjudged submission is considered stuck
pub const DEFAULT_REDISPATCH_AFTER_SECONDS: i64 = 600;

/// Default number of stuck submissions re-enqueued per sweep
pub const DEFAULT_REDISPATCH_BATCH: i64 = 100;
