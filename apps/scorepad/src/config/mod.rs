//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_STORE_PATH: &str = "scorepad-game.json";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub log: LogConfig,
}

impl Config {
    /// Load and validate configuration from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        let store_path = env::var("SCOREPAD_STORE_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let filter =
            env::var("SCOREPAD_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        let format = match env::var("SCOREPAD_LOG_FORMAT") {
            Err(_) => LogFormat::Text,
            Ok(v) => parse_log_format(&v)?,
        };

        Ok(Self {
            store_path,
            log: LogConfig { filter, format },
        })
    }

    pub fn with_store_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.store_path = path;
        }
        self
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(AppError::config(format!(
            "SCOREPAD_LOG_FORMAT must be 'text' or 'json', got '{other}'"
        ))),
    }
}
