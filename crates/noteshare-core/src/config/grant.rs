//! Access grant collaborator configuration.

use serde::{Deserialize, Serialize};

/// Settings for granting note access once a share request is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantConfig {
    /// Base URL of the notes service. When unset, grants are logged only.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Role assigned to the new collaborator.
    #[serde(default = "default_role")]
    pub role: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Total attempts before the acceptance is compensated.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between attempts, multiplied by the attempt number.
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl Default for GrantConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            role: default_role(),
            timeout_seconds: default_timeout(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

fn default_role() -> String {
    "editor".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    200
}
