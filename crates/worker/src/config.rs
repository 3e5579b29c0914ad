use std::time::Duration;

use diagroup_core::error::CoreError;

/// Default delay between two polls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Worker loop configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Pool whose submitted assignments are processed.
    pub source_pool_id: String,
    pub poll_interval: Duration,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default  |
    /// |----------------------|----------|
    /// | `SOURCE_POOL_ID`     | required |
    /// | `POLL_INTERVAL_SECS` | `60`     |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let source_pool_id = get("SOURCE_POOL_ID")
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("SOURCE_POOL_ID must be set".to_string()))?;

        let secs = match get("POLL_INTERVAL_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                CoreError::Validation(format!(
                    "POLL_INTERVAL_SECS must be a positive whole number, got '{raw}'"
                ))
            })?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        };

        Ok(Self {
            source_pool_id,
            poll_interval: Duration::from_secs(secs),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
