//! Query limits and deadlines.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied by the request builders and the pagination engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Row cap used by `scan-table` when the caller supplies none.
    #[serde(default = "default_scan_limit")]
    pub default_scan_limit: i32,

    /// Maximum pages a paginated query may drain. Unset means unbounded.
    ///
    /// Draining is unbounded by default: callers reading large tables should
    /// narrow their key conditions or set this cap.
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Deadline for every store round-trip (each page counts separately).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_scan_limit: default_scan_limit(),
            max_pages: None,
            request_timeout_secs: None,
        }
    }
}

impl LimitsConfig {
    /// Per-request deadline, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_scan_limit < 1 {
            return Err(ConfigError::InvalidSetting {
                name: "limits.default_scan_limit",
                reason: format!("must be at least 1, got {}", self.default_scan_limit),
            });
        }
        if self.max_pages == Some(0) {
            return Err(ConfigError::InvalidSetting {
                name: "limits.max_pages",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidSetting {
                name: "limits.request_timeout_secs",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

fn default_scan_limit() -> i32 {
    100
}
