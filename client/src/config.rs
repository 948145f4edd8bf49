use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "CELEBRITY_API_URL";
pub const TIMEOUT_VAR: &str = "CELEBRITY_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = api_url.trim();
        if api_url.is_empty() {
            return Err(ConfigError::MissingApiUrl);
        }

        let parsed = Url::parse(api_url).map_err(|e| ConfigError::InvalidApiUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_url: parsed,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Read `CELEBRITY_API_URL` and `CELEBRITY_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_VAR).ok_or(ConfigError::MissingApiUrl)?;
        let mut config = Self::new(&api_url)?;

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
