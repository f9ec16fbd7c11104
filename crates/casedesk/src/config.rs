//! Client configuration.
//!
//! Settings come from [`ClientConfig::default`] and can be overridden from
//! the environment with [`ClientConfig::from_env`]:
//!
//! - `CASEDESK_API_URL`: backend base URL (default `http://localhost:8000`)
//! - `CASEDESK_TIMEOUT_SECS`: per-request timeout in seconds (default 30)

use std::time::Duration;

use crate::error::{Error, InvalidInputError};
use crate::types::ApiUrl;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "CASEDESK_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "CASEDESK_TIMEOUT_SECS";

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout. Applies to each network call independently,
/// including the refresh round-trip.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: ApiUrl,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the given backend with default settings.
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("casedesk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Build a configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(API_URL_ENV) {
            Some(value) => ApiUrl::new(&value)?,
            None => ApiUrl::new(DEFAULT_API_URL)?,
        };

        let mut config = Self::new(base_url);

        if let Some(value) = lookup(TIMEOUT_ENV) {
            let secs: u64 = value.trim().parse().map_err(|_| InvalidInputError::Config {
                name: TIMEOUT_ENV.to_string(),
                value: value.clone(),
                reason: "expected a whole number of seconds".to_string(),
            })?;
            if secs == 0 {
                return Err(InvalidInputError::Config {
                    name: TIMEOUT_ENV.to_string(),
                    value,
                    reason: "timeout must be greater than zero".to_string(),
                }
                .into());
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ApiUrl::new(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}
