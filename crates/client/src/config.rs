use std::time::Duration;

use diagroup_core::error::CoreError;

/// Default platform endpoint (the sandbox environment).
pub const DEFAULT_API_URL: &str = "https://sandbox.toloka.dev";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`PlatformClient`](crate::PlatformClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub api_url: String,
    /// OAuth token sent with every request.
    pub token: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default                      |
    /// |-------------------------|------------------------------|
    /// | `PLATFORM_TOKEN`        | required                     |
    /// | `PLATFORM_API_URL`      | `https://sandbox.toloka.dev` |
    /// | `PLATFORM_TIMEOUT_SECS` | `30`                         |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let token = get("PLATFORM_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("PLATFORM_TOKEN must be set".to_string()))?;

        let api_url = get("PLATFORM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match get("PLATFORM_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                CoreError::Validation(format!(
                    "PLATFORM_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(api_url, token);
        config.timeout = Duration::from_secs(timeout_secs);
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
