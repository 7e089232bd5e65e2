use std::{env, str::FromStr, time::Duration};

use url::Url;

use super::env::{
    ApiConfig, AppConfig, ConfigError, DirectoryConfig, FeedbackConfig, LoggingConfig,
    UploadConfig, DEFAULT_COPIED_DURATION, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_REQUEST_TIMEOUT,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_base = env::var("MAILSENSE_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("MAILSENSE_API_BASE_URL"))?;

        let api = ApiConfig {
            base_url: parse_base_url(&raw_base)?,
            request_timeout: parse_millis("MAILSENSE_REQUEST_TIMEOUT_MS")?
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        };

        let upload = UploadConfig {
            max_bytes: parse_number::<u64>("MAILSENSE_MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        };

        let feedback = FeedbackConfig {
            copied_duration: parse_millis("MAILSENSE_COPY_FEEDBACK_MS")?
                .unwrap_or(DEFAULT_COPIED_DURATION),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            api,
            upload,
            feedback,
            directories,
            logging,
        })
    }
}

/// Parses the base URL, forcing a trailing slash so `Url::join` appends
/// endpoint names instead of replacing the last path segment.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized).map_err(|source| ConfigError::BaseUrl {
        value: trimmed.to_string(),
        source,
    })
}

fn parse_number<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(None),
    }
}

fn parse_millis(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    Ok(parse_number::<u64>(key)?.map(Duration::from_millis))
}
