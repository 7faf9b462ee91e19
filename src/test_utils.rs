//! In-memory collaborators for unit and router tests
//!
//! Every fake counts calls and can be switched into a failing mode.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    config::{
        AuthConfig, Config, DatabaseConfig, LogFormat, RedisConfig, RedispatchConfig,
        ServerConfig, StorageConfig,
    },
    constants::{
        DEFAULT_JUDGE_QUEUE, DEFAULT_REDISPATCH_AFTER_SECONDS, DEFAULT_REDISPATCH_BATCH,
        DEFAULT_RESULT_CHANNEL,
    },
    db::repositories::SubmissionTable,
    error::{AppError, AppResult},
    messaging::{JobQueue, ResultBus},
    models::{JudgeResult, Submission},
    services::SubmissionService,
    storage::BlobStore,
};

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, (Vec<u8>, String)>>,
    pub put_calls: AtomicUsize,
    pub fail_put: AtomicBool,
}

impl MemoryBlobStore {
    pub fn cache_control(&self, key: &str) -> Option<String> {
        self.blobs.lock().unwrap().get(key).map(|(_, cc)| cc.clone())
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, data: Vec<u8>, cache_control: &str) -> AppResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(AppError::Storage("blob store unavailable".to_string()));
        }
        self.blobs
            .lock()
            .unwrap()
            .insert(key.to_string(), (data, cache_control.to_string()));
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(key)
            .map(|(data, _)| data.clone())
            .ok_or_else(|| AppError::NotFound(format!("Blob {} not found", key)))
    }
}

#[derive(Default)]
pub struct MemoryTable {
    rows: Mutex<Vec<Submission>>,
    dispatched: Mutex<HashMap<Uuid, i64>>,
    pub put_calls: AtomicUsize,
    pub fail_put: AtomicBool,
    pub fail_reads: AtomicBool,
}

impl MemoryTable {
    /// Stand-in for the judge writing its verdict
    pub fn store_result(&self, id: &Uuid, result: JudgeResult) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|s| s.id == *id) {
            row.result = Some(result);
        }
    }

    /// Insert a record directly, bypassing the service
    pub fn insert(&self, submission: Submission) {
        self.dispatched
            .lock()
            .unwrap()
            .insert(submission.id, submission.created_at);
        self.rows.lock().unwrap().push(submission);
    }

    pub fn dispatched_at(&self, id: &Uuid) -> Option<i64> {
        self.dispatched.lock().unwrap().get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_reads(&self) -> AppResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Storage("table unavailable".to_string()));
        }
        Ok(())
    }

    fn sorted(mut rows: Vec<Submission>) -> Vec<Submission> {
        rows.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        rows
    }
}

#[async_trait]
impl SubmissionTable for MemoryTable {
    async fn put(&self, submission: &Submission) -> AppResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(AppError::Storage("table unavailable".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        if !rows.iter().any(|s| s.id == submission.id) {
            self.dispatched
                .lock()
                .unwrap()
                .insert(submission.id, submission.created_at);
            rows.push(submission.clone());
        }
        Ok(())
    }

    async fn get(&self, id: &Uuid) -> AppResult<Option<Submission>> {
        self.check_reads()?;
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == *id).cloned())
    }

    async fn query_by_problem(&self, problem_id: &str) -> AppResult<Vec<Submission>> {
        self.check_reads()?;
        let rows = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.problem_id == problem_id)
            .cloned()
            .collect();
        Ok(Self::sorted(rows))
    }

    async fn list_unjudged(
        &self,
        dispatched_before: i64,
        limit: i64,
    ) -> AppResult<Vec<Submission>> {
        self.check_reads()?;
        let stored = self.rows.lock().unwrap();
        let dispatched = self.dispatched.lock().unwrap();
        let mut rows: Vec<(i64, Submission)> = stored
            .iter()
            .filter(|s| s.result.is_none())
            .filter_map(|s| {
                let at = dispatched.get(&s.id).copied()?;
                (at <= dispatched_before).then(|| (at, s.clone()))
            })
            .collect();
        rows.sort_by(|a, b| (a.0, a.1.id).cmp(&(b.0, b.1.id)));
        Ok(rows
            .into_iter()
            .take(limit as usize)
            .map(|(_, s)| s)
            .collect())
    }

    async fn mark_dispatched(&self, id: &Uuid, dispatched_at: i64) -> AppResult<()> {
        self.dispatched.lock().unwrap().insert(*id, dispatched_at);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryQueue {
    messages: Mutex<Vec<Uuid>>,
    pub fail_push: AtomicBool,
}

impl MemoryQueue {
    pub fn messages(&self) -> Vec<Uuid> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobQueue for MemoryQueue {
    async fn push(&self, submission_id: &Uuid) -> AppResult<()> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(AppError::Dispatch("queue unavailable".to_string()));
        }
        self.messages.lock().unwrap().push(*submission_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBus {
    published: Mutex<Vec<(String, String)>>,
    pub fail_publish: AtomicBool,
}

impl MemoryBus {
    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultBus for MemoryBus {
    async fn publish(&self, topic: &str, message: String) -> AppResult<()> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(AppError::Notification("bus unavailable".to_string()));
        }
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), message));
        Ok(())
    }
}

/// A service wired to fresh fakes, with handles to inspect them
pub struct Harness {
    pub blobs: Arc<MemoryBlobStore>,
    pub table: Arc<MemoryTable>,
    pub queue: Arc<MemoryQueue>,
    pub service: Arc<SubmissionService>,
}

pub const TEST_CACHE_CONTROL: &str = "public, max-age=86400";

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only";

/// Configuration for router tests; nothing in it is dialed
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            log_format: LogFormat::Pretty,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/judgegate_test".to_string(),
            max_connections: 1,
        },
        redis: RedisConfig {
            url: "redis://localhost:6379".to_string(),
            judge_queue: DEFAULT_JUDGE_QUEUE.to_string(),
            result_channel: DEFAULT_RESULT_CHANNEL.to_string(),
        },
        storage: StorageConfig {
            bucket: "judgegate-test".to_string(),
            endpoint: None,
            region: "us-east-1".to_string(),
            access_key: None,
            secret_key: None,
            cache_control: TEST_CACHE_CONTROL.to_string(),
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
        },
        redispatch: RedispatchConfig {
            interval_seconds: None,
            after_seconds: DEFAULT_REDISPATCH_AFTER_SECONDS,
            batch: DEFAULT_REDISPATCH_BATCH,
        },
    }
}

impl Harness {
    pub fn new() -> Self {
        let blobs = Arc::new(MemoryBlobStore::default());
        let table = Arc::new(MemoryTable::default());
        let queue = Arc::new(MemoryQueue::default());
        let service = Arc::new(SubmissionService::new(
            blobs.clone(),
            table.clone(),
            queue.clone(),
            TEST_CACHE_CONTROL,
        ));

        Self {
            blobs,
            table,
            queue,
            service,
        }
    }
}
