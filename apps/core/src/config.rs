//! Runtime configuration read from the environment (and `.env` when present).

use crate::error::AppError;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use validator::Validate;

pub const ENV_BIND_ADDR: &str = "SENTIMENT_BIND_ADDR";
pub const ENV_MODEL_PATH: &str = "SENTIMENT_MODEL_PATH";
pub const ENV_LEXICON_PATH: &str = "SENTIMENT_LEXICON_PATH";
pub const ENV_STOPWORDS_PATH: &str = "SENTIMENT_STOPWORDS_PATH";
pub const ENV_LOG_FORMAT: &str = "SENTIMENT_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// Bunyan-compatible JSON lines
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

/// Service configuration. Unset resource paths select the bundled resources.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    /// Address the HTTP listener binds to.
    #[validate(length(min = 1))]
    pub bind_addr: String,
    /// JSON classifier artifact.
    pub model_path: Option<PathBuf>,
    /// Tab-separated valence lexicon.
    pub lexicon_path: Option<PathBuf>,
    /// Stopword list, one word per line.
    pub stopwords_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            model_path: None,
            lexicon_path: None,
            stopwords_path: None,
            log_format: LogFormat::Pretty,
        }
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn load() -> Result<Self, AppError> {
        // A missing .env file is normal.
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    /// Read configuration from the process environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(value) => LogFormat::parse(&value)?,
            Err(_) => LogFormat::default(),
        };

        let config = Self {
            bind_addr: env::var(ENV_BIND_ADDR)
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
                .trim()
                .to_string(),
            model_path: optional_path(ENV_MODEL_PATH),
            lexicon_path: optional_path(ENV_LEXICON_PATH),
            stopwords_path: optional_path(ENV_STOPWORDS_PATH),
            log_format,
        };

        config.validate()?;
        config.socket_addr()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        Ok(self.bind_addr.parse::<SocketAddr>()?)
    }
}
