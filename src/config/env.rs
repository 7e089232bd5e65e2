use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub feedback: FeedbackConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    pub copied_duration: Duration,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_COPIED_DURATION: Duration = Duration::from_millis(2_000);

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            copied_duration: DEFAULT_COPIED_DURATION,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("invalid API base URL {value}: {source}")]
    BaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}
