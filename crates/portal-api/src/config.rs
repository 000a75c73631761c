//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Portal API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Vapi API key.
    pub vapi_api_key: String,
    /// Vapi phone number id to place calls from.
    pub vapi_phone_number_id: String,
    /// Optional pre-configured Vapi assistant id.
    pub vapi_assistant_id: Option<String>,
    /// Vapi API base URL.
    pub vapi_base_url: String,
    /// Delay between call status polls.
    pub poll_interval: Duration,
    /// Maximum time to keep polling a single call.
    pub max_wait: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PORTAL_ADDR` | Server bind address | `127.0.0.1:5000` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:readyset.db?mode=rwc` |
    /// | `VAPI_API_KEY` | Vapi API key | (required) |
    /// | `VAPI_PHONE_NUMBER_ID` | Vapi phone number id | (required) |
    /// | `VAPI_ASSISTANT_ID` | Pre-configured assistant id | (none) |
    /// | `VAPI_BASE_URL` | Vapi API base URL | `https://api.vapi.ai` |
    /// | `CALL_POLL_INTERVAL_SECS` | Status poll interval | `10` |
    /// | `CALL_MAX_WAIT_SECS` | Max time to monitor a call | `600` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("PORTAL_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:readyset.db?mode=rwc".to_string());

        let vapi_api_key = env::var("VAPI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        let vapi_phone_number_id =
            env::var("VAPI_PHONE_NUMBER_ID").map_err(|_| ConfigError::MissingPhoneNumberId)?;

        let vapi_assistant_id = env::var("VAPI_ASSISTANT_ID").ok();

        let vapi_base_url = env::var("VAPI_BASE_URL")
            .unwrap_or_else(|_| "https://api.vapi.ai".to_string());

        let poll_interval = duration_var("CALL_POLL_INTERVAL_SECS", 10)?;
        let max_wait = duration_var("CALL_MAX_WAIT_SECS", 600)?;

        Ok(Self {
            addr,
            database_url,
            vapi_api_key,
            vapi_phone_number_id,
            vapi_assistant_id,
            vapi_base_url,
            poll_interval,
            max_wait,
        })
    }
}

fn duration_var(name: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(Duration::from_secs(default_secs)),
        Ok(value) => value
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidDuration(name)),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORTAL_ADDR format")]
    InvalidAddr,

    #[error("VAPI_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("VAPI_PHONE_NUMBER_ID environment variable is required")]
    MissingPhoneNumberId,

    #[error("{0} must be a whole number of seconds")]
    InvalidDuration(&'static str),
}
