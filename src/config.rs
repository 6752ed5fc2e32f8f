//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup and passed by reference (inside
//! the shared state) to every component that needs it.

use std::env;
use std::path::PathBuf;

/// Default port per environment, matching the deployment convention of
/// staging on 3000 and production on 5000.
const STAGING_PORT: u16 = 3000;
const PRODUCTION_PORT: u16 = 5000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment name ("staging" or "production")
    pub env_name: String,
    /// Server port
    pub port: u16,
    /// Root directory for the flat-file document store
    pub data_dir: PathBuf,
    /// Secret key for password hashing (HMAC-SHA256)
    pub hashing_secret: String,
    /// Token validity window in seconds
    pub session_duration_secs: i64,
    /// Maximum number of checks a single user may own
    pub max_checks: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            env_name: "staging".to_string(),
            port: STAGING_PORT,
            data_dir: PathBuf::from(".data"),
            hashing_secret: "thisIsASecret".to_string(),
            session_duration_secs: 3600,
            max_checks: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Staging is the default environment and has working defaults for
    /// every value; production requires an explicit `HASHING_SECRET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let env_name = match env::var("APP_ENV") {
            Ok(name) if name.eq_ignore_ascii_case("production") => "production".to_string(),
            _ => "staging".to_string(),
        };

        let default_port = if env_name == "production" {
            PRODUCTION_PORT
        } else {
            STAGING_PORT
        };

        let hashing_secret = match env::var("HASHING_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret.trim().to_string(),
            _ if env_name == "production" => {
                return Err(ConfigError::Missing("HASHING_SECRET"));
            }
            _ => "thisIsASecret".to_string(),
        };

        Ok(Self {
            env_name,
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_port),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".data")),
            hashing_secret,
            session_duration_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            max_checks: env::var("MAX_CHECKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
