//! # API Configuration Module
//!
//! Configuration for the development API server, read from environment variables.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 5000)
//! - `API_SEED_FILE`: JSON file of initial collections (optional)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)

use eyre::{Result, WrapErr};
use std::env;
use std::path::PathBuf;
use tracing::Level;

/// Parses a `LOG_LEVEL` value, falling back to `default` for anything unrecognised.
pub fn parse_log_level(raw: Option<&str>, default: Level) -> Level {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => default,
    }
}

/// Configuration for the ClassDesk development API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use classdesk_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// JSON seed data loaded at start-up
    pub seed_file: Option<PathBuf>,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            seed_file: None,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `API_PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // Network settings
        let host = env::var("API_HOST").unwrap_or(defaults.host);
        let port = match env::var("API_PORT") {
            Ok(raw) => raw.parse().wrap_err("Invalid API_PORT value")?,
            Err(_) => defaults.port,
        };

        // Data settings
        let seed_file = env::var("API_SEED_FILE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        // Logging settings
        let log_level = parse_log_level(env::var("LOG_LEVEL").ok().as_deref(), defaults.log_level);

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.request_timeout);

        Ok(Self {
            host,
            port,
            seed_file,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
