use crate::error::ConfigError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::env;

/// Default base URL of the platform Web API.
pub const DEFAULT_API_URL: &str = "https://slack.com/api/";

/// Environment variable that overrides [`RuntimeConfig::api_url`].
pub const API_URL_ENV: &str = "SLACK_API_URL";

/// Settings used when enriching handler contexts at dispatch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Base URL handed to every [`ApiClient`](crate::interactivity::ApiClient).
    pub api_url: String,
    /// Variables exposed to handlers through their event context.
    pub env: AHashMap<String, String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            env: AHashMap::new(),
        }
    }
}

impl RuntimeConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        match env::var(API_URL_ENV) {
            Ok(url) => config.api_url = normalize_api_url(&url)?,
            Err(env::VarError::NotPresent) => {}
            Err(e) => {
                return Err(ConfigError::InvalidEnv {
                    name: API_URL_ENV.to_string(),
                    message: e.to_string(),
                });
            }
        }
        Ok(config)
    }

    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(url)?;
        Ok(self)
    }

    pub fn with_env_var(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }
}

/// Ensures the URL is non-empty and ends with exactly one `/`.
fn normalize_api_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidEnv {
            name: API_URL_ENV.to_string(),
            message: "API URL must not be empty".to_string(),
        });
    }
    Ok(format!("{}/", trimmed))
}
