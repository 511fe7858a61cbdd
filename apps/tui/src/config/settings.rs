use crate::domain::DEFAULT_RANGE_DAYS;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

pub const API_URL_VAR: &str = "SHARKWATCH_API_URL";
pub const RANGE_DAYS_VAR: &str = "SHARKWATCH_RANGE_DAYS";
pub const LOG_FILE_VAR: &str = "SHARKWATCH_LOG_FILE";
pub const DEBUG_VAR: &str = "SHARKWATCH_DEBUG";

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_LOG_FILE: &str = "sharkwatch.log";
/// Longest initial window accepted, in days (about 100 years).
pub const MAX_RANGE_DAYS: i64 = 36_500;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be between 1 and {max} days, got {value:?}", max = MAX_RANGE_DAYS)]
    InvalidRangeDays { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub range_days: i64,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            range_days: DEFAULT_RANGE_DAYS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup(API_URL_VAR).map(|v| v.trim().to_string()) {
            Some(url) if !url.is_empty() => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidUrl {
                        var: API_URL_VAR,
                        value: url,
                    });
                }
                url.trim_end_matches('/').to_string()
            }
            _ => defaults.api_url,
        };

        let range_days = match lookup(RANGE_DAYS_VAR) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if (1..=MAX_RANGE_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError::InvalidRangeDays {
                        var: RANGE_DAYS_VAR,
                        value: raw,
                    })
                }
            },
            None => defaults.range_days,
        };

        let log_file = lookup(LOG_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.log_file, PathBuf::from);

        let debug = lookup(DEBUG_VAR).is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"));

        Ok(Self {
            api_url,
            range_days,
            log_file,
            debug,
        })
    }
}

/// Loads `.env` (if present) and resolves the configuration from the environment.
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    dotenv().ok();
    AppConfig::from_lookup(|key| env::var(key).ok())
}
