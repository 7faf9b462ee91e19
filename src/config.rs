//! Application configuration management
//!
//! Configuration is read from environment variables once, in `main`, and
//! handed to constructors. Nothing reads the environment after startup.

use std::env;

use crate::constants::{
    DEFAULT_CODE_CACHE_CONTROL, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_JUDGE_QUEUE,
    DEFAULT_LOG_FILTER, DEFAULT_REDISPATCH_AFTER_SECONDS, DEFAULT_REDISPATCH_BATCH,
    DEFAULT_REDIS_URL, DEFAULT_RESULT_CHANNEL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_STORAGE_REGION,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub redispatch: RedispatchConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration (judge queue and result channel)
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub judge_queue: String,
    pub result_channel: String,
}

/// Object storage configuration for submitted source code
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    /// Custom endpoint (MinIO and friends). `None` uses AWS.
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub cache_control: String,
}

/// Background sweep re-enqueueing submissions no judge picked up
#[derive(Debug, Clone)]
pub struct RedispatchConfig {
    /// Sweep period; `None` disables the sweep
    pub interval_seconds: Option<u64>,
    /// Minimum age of an unjudged submission before it is re-enqueued
    pub after_seconds: i64,
    /// Maximum submissions re-enqueued per sweep
    pub batch: i64,
}

/// JWT verification configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            redispatch: RedispatchConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            log_format: LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default())?,
        })
    }
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "" | "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            judge_queue: env::var("JUDGE_QUEUE")
                .unwrap_or_else(|_| DEFAULT_JUDGE_QUEUE.to_string()),
            result_channel: env::var("RESULT_CHANNEL")
                .unwrap_or_else(|_| DEFAULT_RESULT_CHANNEL.to_string()),
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bucket: env::var("STORAGE_BUCKET")
                .map_err(|_| ConfigError::Missing("STORAGE_BUCKET".to_string()))?,
            endpoint: env::var("STORAGE_ENDPOINT").ok(),
            region: env::var("STORAGE_REGION")
                .unwrap_or_else(|_| DEFAULT_STORAGE_REGION.to_string()),
            access_key: env::var("STORAGE_ACCESS_KEY").ok(),
            secret_key: env::var("STORAGE_SECRET_KEY").ok(),
            cache_control: env::var("CODE_CACHE_CONTROL")
                .unwrap_or_else(|_| DEFAULT_CODE_CACHE_CONTROL.to_string()),
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
        })
    }
}

impl RedispatchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            interval_seconds: env::var("REDISPATCH_INTERVAL_SECONDS")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .map_err(|_| ConfigError::InvalidValue("REDISPATCH_INTERVAL_SECONDS".to_string()))?,
            after_seconds: env::var("REDISPATCH_AFTER_SECONDS")
                .unwrap_or_else(|_| DEFAULT_REDISPATCH_AFTER_SECONDS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REDISPATCH_AFTER_SECONDS".to_string()))?,
            batch: env::var("REDISPATCH_BATCH")
                .unwrap_or_else(|_| DEFAULT_REDISPATCH_BATCH.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REDISPATCH_BATCH".to_string()))?,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
