use eyre::{eyre, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Configuration for the ClassDesk client.
///
/// Everything comes from the environment so the same binary can point at a local stand-in API
/// or a shared deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash
    pub api_url: String,
    /// Where the signed-in session is kept between invocations
    pub session_file: PathBuf,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Log level for the CLI (defaults to warn)
    pub log_level: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("CLASSDESK_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let session_file = match env::var("CLASSDESK_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };

        let request_timeout = match env::var("CLASSDESK_REQUEST_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| eyre!("CLASSDESK_REQUEST_TIMEOUT_SECONDS must be a whole number of seconds"))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECONDS,
        };

        let log_level = env::var("LOG_LEVEL").ok();

        Ok(Self {
            api_url,
            session_file,
            request_timeout,
            log_level,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Get the log level (defaults to WARN if unset or unrecognised)
    pub fn log_level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN)
    }
}

fn default_session_file() -> Result<PathBuf> {
    let home = env::var("HOME")
        .map_err(|_| eyre!("HOME is not set; set CLASSDESK_SESSION_FILE instead"))?;
    Ok(PathBuf::from(home).join(".classdesk").join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_level: Option<&str>) -> ClientConfig {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from("/tmp/session.json"),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            log_level: log_level.map(str::to_string),
        }
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(config(None).log_level(), Level::WARN);
        assert_eq!(config(Some("nonsense")).log_level(), Level::WARN);
    }

    #[test]
    fn test_log_level_custom() {
        assert_eq!(config(Some("debug")).log_level(), Level::DEBUG);
    }

    #[test]
    fn test_timeout() {
        assert_eq!(config(None).timeout(), Duration::from_secs(30));
    }
}
